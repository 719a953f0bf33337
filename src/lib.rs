//! # voc-eval
//!
//! A Rust library for VOC-style object detection evaluation: it undoes
//! letterbox preprocessing geometry, matches predictions to ground truth
//! under an IoU threshold, and aggregates per-class precision/recall
//! into a mean Average Precision (mAP) score.
//!
//! This library provides:
//! - **Coordinate reconstruction** from normalized, letterbox-resized
//!   space back into original-image pixel space
//! - **Greedy detection matching** (confidence-ordered, per-class,
//!   at most one match per ground-truth box)
//! - **AP** per class via the precision envelope and continuous-area
//!   integration of the precision-recall curve
//! - **mAP** averaged over classes with at least one ground-truth
//!   instance
//!
//! ## Features
//!
//! - Center-format (cx, cy, width, height) boxes throughout; corner
//!   format only at the reporting boundary
//! - Parallel per-image processing with deterministic aggregation
//! - Per-image detection/ground-truth text file output
//! - Eager validation of confidence scores and letterbox geometry
//!
//! ## Quick Start
//!
//! ```rust
//! use voc_eval::{evaluate, BoundingBox, EvalConfig, ImageGeometry, ImageSample};
//!
//! // One image: the prediction is already in original-pixel space, the
//! // ground truth is normalized to the padded, resized frame.
//! let sample = ImageSample {
//!     image_id: 0,
//!     predictions: vec![BoundingBox::prediction(0, 32.0, 32.0, 16.0, 16.0, 0.9)],
//!     ground_truth: vec![BoundingBox::ground_truth(0, 0.25, 0.25, 0.125, 0.125)],
//!     geometry: ImageGeometry::identity(128, 128),
//! };
//!
//! let result = evaluate(&[sample], &EvalConfig::default()).unwrap();
//! assert!((result.mean_ap - 1.0).abs() < 1e-9);
//! ```

pub mod error;
pub mod types;
pub mod geometry;
pub mod matching;
pub mod metrics;
pub mod accumulator;
pub mod evaluator;
pub mod stats;
pub mod report;

// Re-export commonly used types and functions
pub use error::{Result, VocEvalError};
pub use types::{
    BoundingBox, ClassStats, EvaluationResult, ImageGeometry, ImageSample, MatchRecord,
};
pub use geometry::reconstruct_bboxes;
pub use matching::match_detections;
pub use accumulator::ApAccumulator;
pub use evaluator::{evaluate, evaluate_with_stats, ErrorPolicy, EvalConfig};
pub use stats::EvaluationStats;
