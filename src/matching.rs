//! Greedy matching of predictions against ground truth for one image.

use crate::error::{Result, VocEvalError};
use crate::metrics::iou::calculate_iou;
use crate::types::{BoundingBox, MatchRecord};
use log::trace;

/// Match one image's predictions to its ground-truth boxes.
///
/// Greedy assignment in the standard detection-evaluation style:
/// predictions are visited in order of descending confidence (stable, so
/// equal scores keep their input order) and each takes the unclaimed
/// same-class ground-truth box with the highest IoU. When that IoU
/// reaches `iou_threshold` the prediction is a true positive and the
/// ground-truth box is claimed; otherwise it is a false positive. A
/// claimed box is never matched again, and no match is ever revisited.
///
/// Ground-truth boxes of a different class never match, whatever their
/// IoU. Exact IoU ties resolve to the first ground-truth box in list
/// order.
///
/// Missed ground truth produces no record here; false negatives enter
/// the metric through the per-class ground-truth totals.
///
/// # Arguments
///
/// * `predictions` - Predicted boxes with confidence scores
/// * `ground_truth` - Ground-truth boxes in the same pixel space
/// * `iou_threshold` - Minimum IoU for a true positive
/// * `image_id` - Image identifier, for trace output
///
/// # Returns
///
/// Returns one `MatchRecord` per prediction, in descending-confidence
/// order.
///
/// # Errors
///
/// Returns `InvalidThreshold` if `iou_threshold` is outside [0.0, 1.0],
/// and `InvalidConfidence` if any prediction has a missing or
/// out-of-range confidence score.
pub fn match_detections(
    predictions: &[BoundingBox],
    ground_truth: &[BoundingBox],
    iou_threshold: f64,
    image_id: u64,
) -> Result<Vec<MatchRecord>> {
    if !(0.0..=1.0).contains(&iou_threshold) {
        return Err(VocEvalError::InvalidThreshold(format!(
            "IoU threshold must be between 0.0 and 1.0, got {iou_threshold}"
        )));
    }

    if predictions.is_empty() {
        return Ok(Vec::new());
    }

    let confidences = predictions
        .iter()
        .map(prediction_confidence)
        .collect::<Result<Vec<f64>>>()?;

    // Stable sort keeps input order for equal confidences.
    let mut pred_indices: Vec<usize> = (0..predictions.len()).collect();
    pred_indices.sort_by(|&a, &b| {
        confidences[b]
            .partial_cmp(&confidences[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut claimed = vec![false; ground_truth.len()];
    let mut records = Vec::with_capacity(predictions.len());

    for &pred_idx in &pred_indices {
        let pred = &predictions[pred_idx];

        let mut best_iou = 0.0;
        let mut best_gt_idx: Option<usize> = None;

        for (gt_idx, gt) in ground_truth.iter().enumerate() {
            if claimed[gt_idx] || gt.class_id != pred.class_id {
                continue;
            }

            // Strict improvement: ties keep the first ground-truth box,
            // and a zero-IoU box is never a candidate.
            let iou = calculate_iou(pred, gt);
            if iou > best_iou {
                best_iou = iou;
                best_gt_idx = Some(gt_idx);
            }
        }

        let is_true_positive = match best_gt_idx {
            Some(gt_idx) if best_iou >= iou_threshold => {
                claimed[gt_idx] = true;
                true
            }
            _ => false,
        };

        trace!(
            "image {image_id}: class {} conf {:.4} best_iou {:.4} -> {}",
            pred.class_id,
            confidences[pred_idx],
            best_iou,
            if is_true_positive { "tp" } else { "fp" }
        );

        records.push(MatchRecord {
            class_id: pred.class_id,
            confidence: confidences[pred_idx],
            is_true_positive,
        });
    }

    Ok(records)
}

/// Extract a prediction's confidence, rejecting missing or
/// out-of-range scores. Never clamps.
fn prediction_confidence(bbox: &BoundingBox) -> Result<f64> {
    match bbox.confidence {
        Some(c) if (0.0..=1.0).contains(&c) => Ok(c),
        Some(c) => Err(VocEvalError::InvalidConfidence(format!(
            "confidence must be between 0.0 and 1.0, got {c}"
        ))),
        None => Err(VocEvalError::InvalidConfidence(
            "prediction is missing a confidence score".to_string(),
        )),
    }
}
