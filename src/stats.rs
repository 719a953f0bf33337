/// Statistics tracking for an evaluation run
///
/// Counters filled by the evaluator while images are processed, mainly
/// useful when per-image errors are downgraded to skips.

use serde::{Deserialize, Serialize};

/// Statistics collected across one evaluation run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationStats {
    /// Number of images successfully processed
    pub processed_images: usize,

    /// Number of images skipped due to per-image errors
    pub skipped_images: usize,

    /// Number of processed images with zero predictions
    pub empty_prediction_images: usize,

    /// Total predictions across processed images
    pub total_predictions: usize,

    /// Total ground-truth boxes across processed images
    pub total_ground_truth: usize,
}

impl EvaluationStats {
    /// Create a new `EvaluationStats` with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one successfully processed image
    pub fn add_image(&mut self, num_predictions: usize, num_ground_truth: usize) {
        self.processed_images += 1;
        self.total_predictions += num_predictions;
        self.total_ground_truth += num_ground_truth;
        if num_predictions == 0 {
            self.empty_prediction_images += 1;
        }
    }

    /// Record one skipped image
    pub fn skip_image(&mut self) {
        self.skipped_images += 1;
    }

    /// Total images seen, processed or skipped
    pub fn total_images(&self) -> usize {
        self.processed_images + self.skipped_images
    }

    /// Get a formatted string summary of the statistics
    pub fn summary_string(&self) -> String {
        format!(
            "EvaluationStats {{ images: {}, skipped: {}, empty: {}, predictions: {}, ground_truth: {} }}",
            self.processed_images,
            self.skipped_images,
            self.empty_prediction_images,
            self.total_predictions,
            self.total_ground_truth
        )
    }
}
