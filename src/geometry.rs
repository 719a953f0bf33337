//! Reconstruction of box coordinates from the letterboxed frame back
//! into original-image pixel space.

use crate::error::{Result, VocEvalError};
use crate::types::{BoundingBox, ImageGeometry};

/// Map normalized center-format boxes from the padded, resized image
/// frame back to original-image pixel coordinates, inverting the
/// letterbox transform.
///
/// The steps run in a fixed order, each on the result of the previous:
///
/// 1. Scale normalized coordinates into resized-image pixel space.
/// 2. Subtract the padding offset from the position fields only.
/// 3. Divide by the non-padded extents.
/// 4. Multiply by the original image extents.
/// 5. Clamp cx and width into `[0, original_w]`, cy and height into
///    `[0, original_h]`.
///
/// Each field is clamped independently; width and height are bounded by
/// the image extent itself, not via the derived box edges.
///
/// Pure function over its inputs. In the evaluation pipeline this is
/// applied once per image to the ground-truth set; predictions arrive
/// already reconstructed by the external decoder.
///
/// # Errors
///
/// Returns `Geometry` when the non-padded region is not strictly
/// positive in both axes: the transform would divide by zero, and the
/// upstream preprocessing is malformed.
///
/// # Example
///
/// ```
/// use voc_eval::geometry::reconstruct_bboxes;
/// use voc_eval::types::{BoundingBox, ImageGeometry};
///
/// let geometry = ImageGeometry::new((512, 512), [0, 64, 0, 64], (256, 128));
/// let boxes = vec![BoundingBox::ground_truth(0, 0.5, 0.5, 0.5, 0.25)];
///
/// let reconstructed = reconstruct_bboxes(&boxes, &geometry).unwrap();
/// assert!((reconstructed[0].cx - 128.0).abs() < 1e-9);
/// assert!((reconstructed[0].cy - 64.0).abs() < 1e-9);
/// ```
pub fn reconstruct_bboxes(
    boxes: &[BoundingBox],
    geometry: &ImageGeometry,
) -> Result<Vec<BoundingBox>> {
    let non_padded_w = geometry.non_padded_w();
    let non_padded_h = geometry.non_padded_h();
    if non_padded_w <= 0 || non_padded_h <= 0 {
        return Err(VocEvalError::Geometry(format!(
            "non-padded region must be positive, got {}x{} (resized {}x{}, padding {:?})",
            non_padded_w,
            non_padded_h,
            geometry.resized_w,
            geometry.resized_h,
            geometry.padded_ltrb
        )));
    }

    let resized_w = geometry.resized_w as f64;
    let resized_h = geometry.resized_h as f64;
    let pad_left = geometry.padded_ltrb[0] as f64;
    let pad_top = geometry.padded_ltrb[1] as f64;
    let non_padded_w = non_padded_w as f64;
    let non_padded_h = non_padded_h as f64;
    let original_w = geometry.original_w as f64;
    let original_h = geometry.original_h as f64;

    let reconstructed = boxes
        .iter()
        .map(|bbox| {
            let mut cx = bbox.cx * resized_w;
            let mut width = bbox.width * resized_w;
            let mut cy = bbox.cy * resized_h;
            let mut height = bbox.height * resized_h;

            cx -= pad_left;
            cy -= pad_top;

            cx /= non_padded_w;
            width /= non_padded_w;
            cy /= non_padded_h;
            height /= non_padded_h;

            cx *= original_w;
            width *= original_w;
            cy *= original_h;
            height *= original_h;

            BoundingBox {
                class_id: bbox.class_id,
                cx: cx.clamp(0.0, original_w),
                cy: cy.clamp(0.0, original_h),
                width: width.clamp(0.0, original_w),
                height: height.clamp(0.0, original_h),
                confidence: bbox.confidence,
            }
        })
        .collect();

    Ok(reconstructed)
}
