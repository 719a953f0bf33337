//! Cross-image accumulation of match records and ground-truth counts.

use crate::error::Result;
use crate::metrics::ap::{class_average_precision, mean_average_precision};
use crate::types::{BoundingBox, ClassStats, EvaluationResult, MatchRecord};
use std::collections::BTreeMap;

/// Accumulates per-class statistics over an evaluation run and produces
/// the final per-class AP and mAP.
///
/// Append-only while images are processed; the AP computation happens
/// once at finalization, since the precision envelope needs the complete
/// sorted record sequence. Workers processing disjoint image subsets can
/// each fill a local accumulator and `merge` them after the join.
#[derive(Debug, Clone, Default)]
pub struct ApAccumulator {
    classes: BTreeMap<u32, ClassStats>,
}

impl ApAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    fn class_entry(&mut self, class_id: u32) -> &mut ClassStats {
        self.classes
            .entry(class_id)
            .or_insert_with(|| ClassStats::new(class_id))
    }

    /// Count one image's ground-truth boxes into their classes.
    ///
    /// Images with zero predictions still pass through here: their
    /// missed boxes enter the metric via the recall denominator.
    pub fn record_ground_truth(&mut self, boxes: &[BoundingBox]) {
        for bbox in boxes {
            self.class_entry(bbox.class_id).total_ground_truth += 1;
        }
    }

    /// Append one image's match records into their classes.
    pub fn record_matches(&mut self, records: Vec<MatchRecord>) {
        for record in records {
            self.class_entry(record.class_id).match_records.push(record);
        }
    }

    /// Fold another accumulator into this one.
    pub fn merge(&mut self, other: ApAccumulator) {
        for (class_id, stats) in other.classes {
            let entry = self.class_entry(class_id);
            entry.total_ground_truth += stats.total_ground_truth;
            entry.match_records.extend(stats.match_records);
        }
    }

    /// Total ground-truth boxes seen so far, across all classes.
    pub fn total_ground_truth(&self) -> usize {
        self.classes.values().map(|s| s.total_ground_truth).sum()
    }

    /// Compute per-class AP and mAP from everything accumulated.
    ///
    /// Classes without any ground-truth instance have no defined AP and
    /// are excluded from both the map and the mean.
    ///
    /// # Errors
    ///
    /// Returns `NoGroundTruth` when every class is excluded.
    pub fn finalize(self) -> Result<EvaluationResult> {
        let mut per_class_ap = BTreeMap::new();
        for (class_id, stats) in &self.classes {
            if let Some(ap) = class_average_precision(stats) {
                per_class_ap.insert(*class_id, ap);
            }
        }

        let mean_ap = mean_average_precision(&per_class_ap)?;
        Ok(EvaluationResult { per_class_ap, mean_ap })
    }
}
