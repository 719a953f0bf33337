//! Average Precision (AP) and mean Average Precision (mAP) calculation.

use crate::error::{Result, VocEvalError};
use crate::metrics::precision_recall::{precision_envelope, precision_recall_curve};
use crate::types::ClassStats;
use std::collections::BTreeMap;

/// Calculate Average Precision from a precision-recall curve.
///
/// Applies the precision envelope and integrates the area under the
/// smoothed curve over the discrete recall steps (continuous-area
/// interpolation, not 11-point sampling). The curve implicitly starts at
/// recall 0.
///
/// # Arguments
///
/// * `precisions` - Precision values, one per admitted detection
/// * `recalls` - Recall values, same length, non-decreasing
///
/// # Returns
///
/// Returns the Average Precision value (0.0 to 1.0).
pub fn calculate_ap(precisions: &[f64], recalls: &[f64]) -> f64 {
    if precisions.is_empty() || recalls.is_empty() {
        return 0.0;
    }

    let mut envelope = precisions.to_vec();
    precision_envelope(&mut envelope);

    let mut ap = recalls[0] * envelope[0];
    for k in 1..recalls.len() {
        ap += (recalls[k] - recalls[k - 1]) * envelope[k];
    }
    ap
}

/// Calculate the Average Precision for one class.
///
/// Records are sorted by descending confidence (stable, so equal scores
/// keep their accumulation order) before the curve is built.
///
/// Returns `None` when the class has no ground-truth instance: recall is
/// undefined and the class is excluded from mAP rather than scored zero.
pub fn class_average_precision(stats: &ClassStats) -> Option<f64> {
    if stats.total_ground_truth == 0 {
        return None;
    }

    let mut records = stats.match_records.clone();
    records.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let (precisions, recalls) = precision_recall_curve(&records, stats.total_ground_truth);
    Some(calculate_ap(&precisions, &recalls))
}

/// Calculate mean Average Precision across classes with a defined AP.
///
/// # Errors
///
/// Returns `NoGroundTruth` when no class produced a defined AP - an
/// evaluation run without any ground-truth instance is meaningless.
pub fn mean_average_precision(per_class_ap: &BTreeMap<u32, f64>) -> Result<f64> {
    if per_class_ap.is_empty() {
        return Err(VocEvalError::NoGroundTruth(
            "no class has any ground-truth instance".to_string(),
        ));
    }

    Ok(per_class_ap.values().sum::<f64>() / per_class_ap.len() as f64)
}
