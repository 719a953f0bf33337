//! Intersection over Union (IoU) calculation for center-format boxes.

use crate::types::BoundingBox;

/// Calculate the Intersection over Union (IoU) between two bounding boxes.
///
/// Corners are derived from the center representation; a box with zero or
/// negative extents has zero area and therefore zero IoU with anything.
///
/// # Arguments
///
/// * `bbox1` - First bounding box
/// * `bbox2` - Second bounding box
///
/// # Returns
///
/// Returns a value between 0.0 (no overlap) and 1.0 (perfect overlap).
///
/// # Example
///
/// ```
/// use voc_eval::metrics::iou::calculate_iou;
/// use voc_eval::types::BoundingBox;
///
/// let bbox1 = BoundingBox::ground_truth(0, 5.0, 5.0, 10.0, 10.0);
/// let bbox2 = BoundingBox::ground_truth(0, 10.0, 10.0, 10.0, 10.0);
/// let iou = calculate_iou(&bbox1, &bbox2);
/// assert!(iou > 0.0 && iou < 1.0);
/// ```
pub fn calculate_iou(bbox1: &BoundingBox, bbox2: &BoundingBox) -> f64 {
    let x_left = bbox1.left().max(bbox2.left());
    let y_top = bbox1.top().max(bbox2.top());
    let x_right = bbox1.right().min(bbox2.right());
    let y_bottom = bbox1.bottom().min(bbox2.bottom());

    if x_right < x_left || y_bottom < y_top {
        return 0.0;
    }

    let intersection_area = (x_right - x_left) * (y_bottom - y_top);

    let union_area = bbox1.area() + bbox2.area() - intersection_area;

    if union_area == 0.0 {
        return 0.0;
    }

    intersection_area / union_area
}

/// Calculate the IoU matrix between two sets of bounding boxes.
///
/// `result[i][j]` is the IoU between `bboxes1[i]` and `bboxes2[j]`.
pub fn calculate_iou_matrix(bboxes1: &[BoundingBox], bboxes2: &[BoundingBox]) -> Vec<Vec<f64>> {
    bboxes1
        .iter()
        .map(|bbox1| {
            bboxes2
                .iter()
                .map(|bbox2| calculate_iou(bbox1, bbox2))
                .collect()
        })
        .collect()
}
