//! Reporting boundary: per-image detection text files and JSON output.
//!
//! Boxes are converted from center format to corner format here and
//! only here; the matching pipeline never sees corner format.

use crate::error::{Result, VocEvalError};
use crate::types::BoundingBox;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn class_name<'a>(class_names: &'a [&str], class_id: u32) -> Result<&'a str> {
    class_names
        .get(class_id as usize)
        .copied()
        .ok_or(VocEvalError::UnknownClass(class_id))
}

/// Format one ground-truth box as `class_name left top right bottom`.
pub fn format_ground_truth_line(bbox: &BoundingBox, class_names: &[&str]) -> Result<String> {
    let name = class_name(class_names, bbox.class_id)?;
    let [l, t, r, b] = bbox.to_ltrb();
    Ok(format!("{name} {l} {t} {r} {b}"))
}

/// Format one detection as `class_name confidence left top right bottom`.
pub fn format_detection_line(bbox: &BoundingBox, class_names: &[&str]) -> Result<String> {
    let name = class_name(class_names, bbox.class_id)?;
    let confidence = bbox.confidence.ok_or_else(|| {
        VocEvalError::InvalidConfidence("detection line requires a confidence score".to_string())
    })?;
    let [l, t, r, b] = bbox.to_ltrb();
    Ok(format!("{name} {confidence} {l} {t} {r} {b}"))
}

/// Write one image's ground-truth boxes, one line per box.
pub fn write_ground_truth<W: Write>(
    writer: &mut W,
    boxes: &[BoundingBox],
    class_names: &[&str],
) -> Result<()> {
    for bbox in boxes {
        writeln!(writer, "{}", format_ground_truth_line(bbox, class_names)?)?;
    }
    Ok(())
}

/// Write one image's detections, one line per box.
pub fn write_detections<W: Write>(
    writer: &mut W,
    boxes: &[BoundingBox],
    class_names: &[&str],
) -> Result<()> {
    for bbox in boxes {
        writeln!(writer, "{}", format_detection_line(bbox, class_names)?)?;
    }
    Ok(())
}

/// Write one image's ground-truth boxes to a text file.
pub fn save_ground_truth<P: AsRef<Path>>(
    path: P,
    boxes: &[BoundingBox],
    class_names: &[&str],
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_ground_truth(&mut writer, boxes, class_names)?;
    writer.flush()?;
    Ok(())
}

/// Write one image's detections to a text file.
pub fn save_detections<P: AsRef<Path>>(
    path: P,
    boxes: &[BoundingBox],
    class_names: &[&str],
) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_detections(&mut writer, boxes, class_names)?;
    writer.flush()?;
    Ok(())
}
