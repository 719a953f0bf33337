//! Metrics calculation modules for detection evaluation.

pub mod iou;
pub mod ap;
pub mod precision_recall;

pub use iou::{calculate_iou, calculate_iou_matrix};
pub use ap::{calculate_ap, class_average_precision, mean_average_precision};
pub use precision_recall::{precision_envelope, precision_recall_curve};
