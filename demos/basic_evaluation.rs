//! Basic evaluation example demonstrating core functionality.

use voc_eval::{
    evaluate_with_stats, match_detections, metrics::iou::calculate_iou, reconstruct_bboxes,
    report::write_detections, BoundingBox, EvalConfig, ImageGeometry, ImageSample,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Detection Evaluation Example ===\n");

    // Example 1: IoU Calculation
    println!("1. IoU Calculation");
    let bbox1 = BoundingBox::ground_truth(0, 35.0, 35.0, 50.0, 50.0);
    let bbox2 = BoundingBox::ground_truth(0, 55.0, 55.0, 50.0, 50.0);
    let iou = calculate_iou(&bbox1, &bbox2);
    println!("   IoU between overlapping boxes: {:.4}", iou);
    println!();

    // Example 2: Letterbox reconstruction
    println!("2. Letterbox Reconstruction");
    let geometry = ImageGeometry::new((512, 512), [0, 64, 0, 64], (256, 128));
    let normalized = vec![BoundingBox::ground_truth(0, 0.5, 0.5, 0.5, 0.25)];
    let reconstructed = reconstruct_bboxes(&normalized, &geometry)?;
    println!(
        "   Normalized (0.5, 0.5, 0.5, 0.25) -> pixel ({:.1}, {:.1}, {:.1}, {:.1})",
        reconstructed[0].cx,
        reconstructed[0].cy,
        reconstructed[0].width,
        reconstructed[0].height
    );
    println!();

    // Example 3: Matching one image
    println!("3. Greedy Matching");
    let predictions = vec![
        BoundingBox::prediction(0, 128.0, 64.0, 128.0, 42.0, 0.92),
        BoundingBox::prediction(0, 40.0, 40.0, 30.0, 30.0, 0.40),
    ];
    let records = match_detections(&predictions, &reconstructed, 0.5, 0)?;
    for record in &records {
        println!(
            "   class {} conf {:.2} -> {}",
            record.class_id,
            record.confidence,
            if record.is_true_positive { "true positive" } else { "false positive" }
        );
    }
    println!();

    // Example 4: Full evaluation over a small batch
    println!("4. Running Full Evaluation");
    let samples = vec![
        ImageSample {
            image_id: 0,
            predictions,
            ground_truth: normalized,
            geometry,
        },
        ImageSample {
            image_id: 1,
            predictions: vec![BoundingBox::prediction(1, 160.0, 120.0, 80.0, 60.0, 0.85)],
            ground_truth: vec![BoundingBox::ground_truth(1, 0.5, 0.5, 0.25, 0.25)],
            geometry: ImageGeometry::identity(320, 240),
        },
    ];

    let (result, stats) = evaluate_with_stats(&samples, &EvalConfig::default())?;
    println!("   Evaluation complete!");
    println!();
    println!("   mAP: {:.4}", result.mean_ap);
    println!("   Per-Class AP:");
    for (class_id, ap) in &result.per_class_ap {
        println!("   - class {}: {:.4}", class_id, ap);
    }
    println!("   {}", stats.summary_string());
    println!();

    // Example 5: Detection file rendering (corner format at the boundary)
    println!("5. Detection File Lines");
    let class_names = &["polyp", "vehicle"];
    let mut buffer = Vec::new();
    write_detections(&mut buffer, &samples[1].predictions, class_names)?;
    print!("{}", String::from_utf8(buffer)?);
    println!();

    // Example 6: JSON rendering for a reporting sink
    println!("6. JSON Output");
    println!("{}", result.to_json()?);
    println!();

    println!("=== Example Complete ===");

    Ok(())
}
