//! Batch evaluation orchestrator: geometry inversion, matching, mAP.

use crate::accumulator::ApAccumulator;
use crate::error::Result;
use crate::geometry::reconstruct_bboxes;
use crate::matching::match_detections;
use crate::stats::EvaluationStats;
use crate::types::{BoundingBox, EvaluationResult, ImageSample, MatchRecord};
use log::{debug, warn};
use rayon::prelude::*;

/// What to do when a single image fails to process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Fail the whole run on the first per-image error. Geometry and
    /// confidence errors indicate an upstream bug, so this is the
    /// default.
    Abort,
    /// Log the error, count the image as skipped, and keep going.
    SkipImage,
}

/// Configuration for an evaluation run.
#[derive(Debug, Clone)]
pub struct EvalConfig {
    /// Minimum IoU for a prediction to claim a ground-truth box.
    pub iou_threshold: f64,
    /// Per-image error handling.
    pub error_policy: ErrorPolicy,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self { iou_threshold: 0.5, error_policy: ErrorPolicy::Abort }
    }
}

/// One image's processed output, before aggregation.
struct ImageOutcome {
    ground_truth: Vec<BoundingBox>,
    records: Vec<MatchRecord>,
    num_predictions: usize,
}

/// Reconstruct one image's ground truth and match its predictions.
///
/// Predictions are already in original-pixel space; only the ground
/// truth passes through the letterbox inversion.
fn process_image(sample: &ImageSample, config: &EvalConfig) -> Result<ImageOutcome> {
    let ground_truth = reconstruct_bboxes(&sample.ground_truth, &sample.geometry)?;
    let records = match_detections(
        &sample.predictions,
        &ground_truth,
        config.iou_threshold,
        sample.image_id,
    )?;

    Ok(ImageOutcome {
        ground_truth,
        records,
        num_predictions: sample.predictions.len(),
    })
}

/// Evaluate a batch of images and return per-class AP plus mAP.
///
/// Images are processed in parallel (they share no mutable state);
/// aggregation into the accumulator is single-writer after the join, in
/// input order, so results are deterministic for a given input. AP and
/// mAP are computed once at the end - the precision envelope needs the
/// complete sorted record sequence, so there is no streaming AP.
///
/// # Example
///
/// ```
/// use voc_eval::evaluator::{evaluate, EvalConfig};
/// use voc_eval::types::{BoundingBox, ImageGeometry, ImageSample};
///
/// let sample = ImageSample {
///     image_id: 0,
///     predictions: vec![BoundingBox::prediction(0, 32.0, 32.0, 16.0, 16.0, 0.9)],
///     ground_truth: vec![BoundingBox::ground_truth(0, 0.25, 0.25, 0.125, 0.125)],
///     geometry: ImageGeometry::identity(128, 128),
/// };
///
/// let result = evaluate(&[sample], &EvalConfig::default()).unwrap();
/// assert!((result.mean_ap - 1.0).abs() < 1e-9);
/// ```
pub fn evaluate(samples: &[ImageSample], config: &EvalConfig) -> Result<EvaluationResult> {
    evaluate_with_stats(samples, config).map(|(result, _)| result)
}

/// Like [`evaluate`], additionally returning run statistics.
pub fn evaluate_with_stats(
    samples: &[ImageSample],
    config: &EvalConfig,
) -> Result<(EvaluationResult, EvaluationStats)> {
    // Parallel map phase: one task per image, no shared mutable state.
    let outcomes: Vec<(u64, Result<ImageOutcome>)> = samples
        .par_iter()
        .map(|sample| (sample.image_id, process_image(sample, config)))
        .collect();

    let mut accumulator = ApAccumulator::new();
    let mut stats = EvaluationStats::new();

    for (image_id, outcome) in outcomes {
        match outcome {
            Ok(outcome) => {
                stats.add_image(outcome.num_predictions, outcome.ground_truth.len());
                accumulator.record_ground_truth(&outcome.ground_truth);
                accumulator.record_matches(outcome.records);
            }
            Err(err) => match config.error_policy {
                ErrorPolicy::Abort => return Err(err),
                ErrorPolicy::SkipImage => {
                    warn!("image {image_id}: skipped ({err})");
                    stats.skip_image();
                }
            },
        }
    }

    let result = accumulator.finalize()?;
    debug!(
        "evaluated {} images ({} skipped): mAP {:.4}",
        stats.processed_images, stats.skipped_images, result.mean_ap
    );

    Ok((result, stats))
}
