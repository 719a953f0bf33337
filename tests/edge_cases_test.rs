//! Comprehensive edge case and boundary condition tests.

use voc_eval::evaluator::{evaluate, EvalConfig};
use voc_eval::matching::match_detections;
use voc_eval::types::{BoundingBox, ImageGeometry, ImageSample};

fn gt(class_id: u32, cx: f64, cy: f64, w: f64, h: f64) -> BoundingBox {
    BoundingBox::ground_truth(class_id, cx, cy, w, h)
}

fn pred(class_id: u32, cx: f64, cy: f64, w: f64, h: f64, conf: f64) -> BoundingBox {
    BoundingBox::prediction(class_id, cx, cy, w, h, conf)
}

// ============================================================================
// MATCHING EDGE CASES
// ============================================================================

#[test]
fn test_empty_predictions_with_ground_truth() {
    let ground_truth = vec![gt(0, 35.0, 35.0, 50.0, 50.0)];

    let records = match_detections(&[], &ground_truth, 0.5, 1).unwrap();
    assert_eq!(records.len(), 0, "Should emit no records with empty predictions");
}

#[test]
fn test_empty_ground_truth_with_predictions() {
    let predictions = vec![pred(0, 35.0, 35.0, 50.0, 50.0, 0.9)];

    let records = match_detections(&predictions, &[], 0.5, 1).unwrap();
    assert_eq!(records.len(), 1);
    assert!(!records[0].is_true_positive, "Should be false positive");
}

#[test]
fn test_many_predictions_one_ground_truth() {
    let ground_truth = vec![gt(0, 100.0, 100.0, 100.0, 100.0)];

    let predictions = vec![
        pred(0, 100.0, 100.0, 100.0, 100.0, 0.95),
        pred(0, 102.0, 102.0, 100.0, 100.0, 0.90),
        pred(0, 98.0, 98.0, 100.0, 100.0, 0.85),
        pred(0, 105.0, 105.0, 100.0, 100.0, 0.80),
    ];

    let records = match_detections(&predictions, &ground_truth, 0.5, 1).unwrap();
    assert_eq!(records.len(), 4);

    // Only the highest confidence prediction should match
    let tp_count = records.iter().filter(|r| r.is_true_positive).count();
    assert_eq!(tp_count, 1, "Only one prediction should match the GT");
    assert!(records[0].is_true_positive);
    assert_eq!(records[0].confidence, 0.95);
}

#[test]
fn test_one_prediction_many_ground_truths() {
    let ground_truth = vec![
        gt(0, 35.0, 35.0, 50.0, 50.0),
        gt(0, 125.0, 125.0, 50.0, 50.0),
        gt(0, 225.0, 225.0, 50.0, 50.0),
    ];

    let predictions = vec![pred(0, 35.0, 35.0, 50.0, 50.0, 0.9)];

    let records = match_detections(&predictions, &ground_truth, 0.5, 1).unwrap();
    assert_eq!(records.len(), 1);
    assert!(records[0].is_true_positive, "Should match one GT");
}

#[test]
fn test_at_most_one_match_per_ground_truth() {
    // Six near-identical predictions over two ground truths: exactly two
    // true positives, whatever the confidences.
    let ground_truth = vec![gt(0, 50.0, 50.0, 40.0, 40.0), gt(0, 54.0, 54.0, 40.0, 40.0)];
    let predictions: Vec<BoundingBox> = (0..6)
        .map(|i| pred(0, 50.0 + i as f64, 50.0 + i as f64, 40.0, 40.0, 0.9 - 0.1 * i as f64))
        .collect();

    let records = match_detections(&predictions, &ground_truth, 0.3, 1).unwrap();
    let tp_count = records.iter().filter(|r| r.is_true_positive).count();
    assert_eq!(tp_count, 2);
}

#[test]
fn test_greedy_matching_is_not_optimal() {
    // The high-confidence prediction overlaps both ground truths and
    // claims the best one greedily, even though giving it the second box
    // would let the low-confidence prediction match too.
    let ground_truth = vec![gt(0, 50.0, 50.0, 40.0, 40.0), gt(0, 58.0, 58.0, 40.0, 40.0)];
    let predictions = vec![
        pred(0, 54.0, 54.0, 40.0, 40.0, 0.9),
        pred(0, 50.0, 50.0, 40.0, 40.0, 0.2),
    ];

    let records = match_detections(&predictions, &ground_truth, 0.6, 1).unwrap();

    assert!(records[0].is_true_positive);
    // The low-confidence prediction is left with the farther box.
    assert!(!records[1].is_true_positive);
}

#[test]
fn test_zero_area_boxes_do_not_match() {
    let ground_truth = vec![gt(0, 10.0, 10.0, 0.0, 0.0)];
    let predictions = vec![pred(0, 10.0, 10.0, 0.0, 0.0, 0.9)];

    let records = match_detections(&predictions, &ground_truth, 0.5, 1).unwrap();
    assert_eq!(records.len(), 1);
    assert!(!records[0].is_true_positive, "Zero-area boxes have zero IoU");
}

#[test]
fn test_negative_extent_boxes_are_zero_area() {
    let ground_truth = vec![gt(0, 10.0, 10.0, -5.0, 8.0)];
    let predictions = vec![pred(0, 10.0, 10.0, 8.0, 8.0, 0.9)];

    let records = match_detections(&predictions, &ground_truth, 0.5, 1).unwrap();
    assert!(!records[0].is_true_positive);
}

#[test]
fn test_mixed_classes_in_one_image() {
    let ground_truth = vec![gt(0, 50.0, 50.0, 40.0, 40.0), gt(1, 50.0, 50.0, 40.0, 40.0)];
    let predictions = vec![
        pred(1, 50.0, 50.0, 40.0, 40.0, 0.9),
        pred(0, 50.0, 50.0, 40.0, 40.0, 0.8),
    ];

    let records = match_detections(&predictions, &ground_truth, 0.5, 1).unwrap();
    assert!(records.iter().all(|r| r.is_true_positive));
    assert_eq!(records[0].class_id, 1);
    assert_eq!(records[1].class_id, 0);
}

// ============================================================================
// PIPELINE EDGE CASES
// ============================================================================

#[test]
fn test_single_image_single_box() {
    let samples = vec![ImageSample {
        image_id: 1,
        predictions: vec![pred(0, 50.0, 50.0, 20.0, 20.0, 0.9)],
        ground_truth: vec![gt(0, 0.5, 0.5, 0.2, 0.2)],
        geometry: ImageGeometry::identity(100, 100),
    }];

    let result = evaluate(&samples, &EvalConfig::default()).unwrap();
    assert!((result.mean_ap - 1.0).abs() < 1e-10);
}

#[test]
fn test_predictions_for_class_without_ground_truth() {
    // Class 5 never appears in ground truth, so it contributes nothing
    // to the mean, not even a zero.
    let samples = vec![ImageSample {
        image_id: 1,
        predictions: vec![
            pred(0, 50.0, 50.0, 20.0, 20.0, 0.9),
            pred(5, 20.0, 20.0, 20.0, 20.0, 0.99),
        ],
        ground_truth: vec![gt(0, 0.5, 0.5, 0.2, 0.2)],
        geometry: ImageGeometry::identity(100, 100),
    }];

    let result = evaluate(&samples, &EvalConfig::default()).unwrap();
    assert!(!result.per_class_ap.contains_key(&5));
    assert!((result.mean_ap - 1.0).abs() < 1e-10);
}

#[test]
fn test_duplicate_detections_count_once() {
    // The same object detected twice: one TP, one FP.
    let samples = vec![ImageSample {
        image_id: 1,
        predictions: vec![
            pred(0, 50.0, 50.0, 20.0, 20.0, 0.9),
            pred(0, 50.0, 50.0, 20.0, 20.0, 0.8),
        ],
        ground_truth: vec![gt(0, 0.5, 0.5, 0.2, 0.2)],
        geometry: ImageGeometry::identity(100, 100),
    }];

    let result = evaluate(&samples, &EvalConfig::default()).unwrap();

    // Precision 1 then 1/2 over recall 1, 1. AP = 1.0 (the envelope keeps
    // the dip after full recall from mattering).
    assert!((result.mean_ap - 1.0).abs() < 1e-10);
}

#[test]
fn test_large_confidence_spread() {
    let samples = vec![ImageSample {
        image_id: 1,
        predictions: vec![
            pred(0, 50.0, 50.0, 20.0, 20.0, 1.0),
            pred(0, 20.0, 20.0, 20.0, 20.0, 0.0),
        ],
        ground_truth: vec![gt(0, 0.5, 0.5, 0.2, 0.2), gt(0, 0.2, 0.2, 0.2, 0.2)],
        geometry: ImageGeometry::identity(100, 100),
    }];

    let result = evaluate(&samples, &EvalConfig::default()).unwrap();
    assert!((result.mean_ap - 1.0).abs() < 1e-10);
}
