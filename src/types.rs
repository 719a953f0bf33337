//! Core data types for detection evaluation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A bounding box in center format (cx, cy, width, height).
///
/// All boxes at the evaluation boundary use this representation:
/// - cx, cy: box center
/// - width, height: box extents
///
/// Ground-truth boxes carry no confidence; predictions must. Negative
/// extents are accepted defensively and treated as an empty box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub class_id: u32,
    pub cx: f64,
    pub cy: f64,
    pub width: f64,
    pub height: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl BoundingBox {
    /// Create a ground-truth box (no confidence score).
    pub fn ground_truth(class_id: u32, cx: f64, cy: f64, width: f64, height: f64) -> Self {
        Self { class_id, cx, cy, width, height, confidence: None }
    }

    /// Create a predicted box with a confidence score.
    pub fn prediction(
        class_id: u32,
        cx: f64,
        cy: f64,
        width: f64,
        height: f64,
        confidence: f64,
    ) -> Self {
        Self { class_id, cx, cy, width, height, confidence: Some(confidence) }
    }

    /// Get the area of the bounding box. Empty for negative extents.
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Get the left edge (cx - width/2).
    pub fn left(&self) -> f64 {
        self.cx - self.width.max(0.0) / 2.0
    }

    /// Get the top edge (cy - height/2).
    pub fn top(&self) -> f64 {
        self.cy - self.height.max(0.0) / 2.0
    }

    /// Get the right edge (cx + width/2).
    pub fn right(&self) -> f64 {
        self.cx + self.width.max(0.0) / 2.0
    }

    /// Get the bottom edge (cy + height/2).
    pub fn bottom(&self) -> f64 {
        self.cy + self.height.max(0.0) / 2.0
    }

    /// Convert to corner format [left, top, right, bottom].
    ///
    /// Corner format only exists at the reporting boundary; matching and
    /// accumulation operate on center format throughout.
    pub fn to_ltrb(&self) -> [f64; 4] {
        [self.left(), self.top(), self.right(), self.bottom()]
    }

    /// Build a box from corner format [left, top, right, bottom].
    pub fn from_ltrb(class_id: u32, ltrb: [f64; 4], confidence: Option<f64>) -> Self {
        let [l, t, r, b] = ltrb;
        Self {
            class_id,
            cx: (l + r) / 2.0,
            cy: (t + b) / 2.0,
            width: r - l,
            height: b - t,
            confidence,
        }
    }

    /// Check that the box has positive extents.
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }
}

/// Letterbox geometry for one image, produced by the external
/// preprocessing step.
///
/// `padded_ltrb` is the padding added around the resized content, in
/// resized-space pixels: left, top, right, bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageGeometry {
    pub resized_w: u32,
    pub resized_h: u32,
    pub padded_ltrb: [u32; 4],
    pub original_w: u32,
    pub original_h: u32,
}

impl ImageGeometry {
    pub fn new(resized: (u32, u32), padded_ltrb: [u32; 4], original: (u32, u32)) -> Self {
        Self {
            resized_w: resized.0,
            resized_h: resized.1,
            padded_ltrb,
            original_w: original.0,
            original_h: original.1,
        }
    }

    /// Geometry for an image that was never resized or padded.
    pub fn identity(w: u32, h: u32) -> Self {
        Self::new((w, h), [0, 0, 0, 0], (w, h))
    }

    /// Width of the non-padded region, in resized-space pixels.
    ///
    /// Signed so that over-large padding is detectable rather than
    /// wrapping.
    pub fn non_padded_w(&self) -> i64 {
        self.resized_w as i64 - self.padded_ltrb[0] as i64 - self.padded_ltrb[2] as i64
    }

    /// Height of the non-padded region, in resized-space pixels.
    pub fn non_padded_h(&self) -> i64 {
        self.resized_h as i64 - self.padded_ltrb[1] as i64 - self.padded_ltrb[3] as i64
    }
}

/// Outcome of matching one prediction against an image's ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub class_id: u32,
    pub confidence: f64,
    pub is_true_positive: bool,
}

/// Per-class accumulation across the whole evaluation run.
///
/// Mutated by appends only; read once at finalization. The record order
/// is irrelevant until the final confidence sort.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassStats {
    pub class_id: u32,
    pub total_ground_truth: usize,
    pub match_records: Vec<MatchRecord>,
}

impl ClassStats {
    pub fn new(class_id: u32) -> Self {
        Self { class_id, total_ground_truth: 0, match_records: Vec::new() }
    }
}

/// One image's evaluation inputs, as supplied by the external
/// detector/decoder and dataset loader.
///
/// Predictions arrive already reconstructed into original-pixel space;
/// ground-truth boxes are still normalized to the padded, resized frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSample {
    pub image_id: u64,
    pub predictions: Vec<BoundingBox>,
    pub ground_truth: Vec<BoundingBox>,
    pub geometry: ImageGeometry,
}

/// Final evaluation output: per-class AP and their mean.
///
/// Classes without any ground-truth instance have no defined AP and are
/// absent from the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub per_class_ap: BTreeMap<u32, f64>,
    pub mean_ap: f64,
}

impl EvaluationResult {
    /// Render the result as pretty-printed JSON for a reporting sink.
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
