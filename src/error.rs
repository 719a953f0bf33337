//! Error types for the voc-eval library.

use thiserror::Error;

/// Result type for voc-eval operations.
pub type Result<T> = std::result::Result<T, VocEvalError>;

/// Error types that can occur during detection evaluation.
#[derive(Error, Debug)]
pub enum VocEvalError {
    /// Error during JSON serialization at the reporting boundary.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Error during I/O operations.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Letterbox geometry whose non-padded region is empty or negative.
    ///
    /// Indicates malformed upstream preprocessing; the affected image
    /// cannot be reconstructed.
    #[error("Invalid geometry: {0}")]
    Geometry(String),

    /// Prediction confidence missing or outside [0.0, 1.0].
    ///
    /// Raised eagerly at ingestion and never clamped, since an
    /// out-of-range score corrupts the confidence sort the AP
    /// computation relies on.
    #[error("Invalid confidence: {0}")]
    InvalidConfidence(String),

    /// IoU threshold outside the valid range [0.0, 1.0].
    #[error("Invalid threshold: {0}")]
    InvalidThreshold(String),

    /// Class id with no known name at the reporting boundary.
    #[error("Unknown class id: {0}")]
    UnknownClass(u32),

    /// Evaluation set with no ground-truth instance in any class.
    #[error("No ground truth: {0}")]
    NoGroundTruth(String),
}
