//! Result aggregation: folds primary evaluation results into message-,
//! class- and element-level rollups plus the flat indexes the audit
//! renderer reads.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::item::{EvaluationItem, ItemType};
use crate::result::{EvaluationResult, ProcessingState};
use crate::rubric::ScoringEffect;

/// Counter set maintained at every rollup level.
///
/// `count`/`weighted_count` are the scoring denominators, `passed`/
/// `weighted_passed` the numerators. Skipped results increment `skipped`
/// only and never reach a denominator. Informational results contribute to
/// the activity counters (`total`, `processed`, `skipped`) but never to a
/// denominator, numerator or failure count; their outcomes are tallied
/// separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoreRollup {
    pub total: u64,
    pub weighted_total: u64,
    pub processed: u64,
    pub skipped: u64,
    pub count: u64,
    pub weighted_count: u64,
    pub passed: u64,
    pub weighted_passed: u64,
    pub critical_failures: u64,
}

impl ScoreRollup {
    /// Fold one primary result. Dependent and conditional records must be
    /// filtered out by the caller; feeding them here would double-count.
    pub fn record(&mut self, result: &EvaluationResult) {
        debug_assert!(result.is_primary());
        let scoring = result.effect == ScoringEffect::Scoring;

        self.total += 1;
        if scoring {
            self.weighted_total += result.weight;
        }

        match result.state {
            ProcessingState::Skipped => {
                self.skipped += 1;
            }
            ProcessingState::Passed | ProcessingState::Failed => {
                self.processed += 1;
                if scoring {
                    self.count += 1;
                    self.weighted_count += result.weight;
                    if result.state == ProcessingState::Passed {
                        self.passed += 1;
                        self.weighted_passed += result.weight;
                    } else if result.is_critical {
                        self.critical_failures += 1;
                    }
                }
            }
            ProcessingState::Pending => {
                debug_assert!(false, "pending result reached aggregation");
            }
        }
    }

    /// Field-wise sum; rollups combine by ordered merge, never by racing
    /// counters.
    pub fn absorb(&mut self, other: &ScoreRollup) {
        self.total += other.total;
        self.weighted_total += other.weighted_total;
        self.processed += other.processed;
        self.skipped += other.skipped;
        self.count += other.count;
        self.weighted_count += other.weighted_count;
        self.passed += other.passed;
        self.weighted_passed += other.weighted_passed;
        self.critical_failures += other.critical_failures;
    }

    /// Unweighted percentage score, truncated. Zero denominator scores
    /// zero, not an error.
    pub fn score(&self) -> u64 {
        percentage(self.passed, self.count)
    }

    /// Weighted percentage score, truncated.
    pub fn weighted_score(&self) -> u64 {
        percentage(self.weighted_passed, self.weighted_count)
    }
}

fn percentage(numerator: u64, denominator: u64) -> u64 {
    if denominator == 0 {
        0
    } else {
        numerator * 100 / denominator
    }
}

/// Rollup for one element item, including the results of its attributes.
#[derive(Debug, Clone, Serialize)]
pub struct ElementStatistics {
    pub path: String,
    pub mnemonic: String,
    pub display_name: String,
    pub sequence: u32,
    pub rollup: ScoreRollup,
}

/// Rollup for one class: the sum of its elements plus any results recorded
/// against the class item itself.
#[derive(Debug, Clone, Serialize)]
pub struct ClassStatistics {
    pub mnemonic: String,
    pub display_name: String,
    pub rollup: ScoreRollup,
    pub elements: Vec<ElementStatistics>,
}

/// One entry of the flat critical-failure index.
#[derive(Debug, Clone, Serialize)]
pub struct CriticalFailure {
    pub item_path: String,
    pub criterion_name: String,
    pub sam_mnemonic: String,
    pub reason: Option<String>,
}

/// One entry of the flat skip/fail reason index.
#[derive(Debug, Clone, Serialize)]
pub struct ReasonEntry {
    pub item_path: String,
    pub criterion_name: String,
    pub sam_mnemonic: String,
    pub state: ProcessingState,
    pub reason: Option<String>,
}

/// Tally of informational results for one (entity, method) pairing.
/// Informational outcomes never touch a score; whether a critical
/// informational failure should count anywhere is an open requirements
/// question, and until it is answered they are deliberately excluded from
/// the critical-failure index as well.
#[derive(Debug, Clone, Serialize)]
pub struct InformationalTally {
    pub entity_mnemonic: String,
    pub sam_mnemonic: String,
    pub processed: u64,
    pub passed: u64,
    pub failed: u64,
    pub skipped: u64,
}

/// The full statistics object for one evaluated message.
#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub message: ScoreRollup,
    pub classes: Vec<ClassStatistics>,
    pub critical_failures: Vec<CriticalFailure>,
    pub reasons: Vec<ReasonEntry>,
    pub informational: Vec<InformationalTally>,
}

impl Statistics {
    /// Fold a completed result tree. The tree must already be in walk
    /// order; iteration order here defines index order in the output.
    pub fn collect(tree: &EvaluationItem) -> Statistics {
        let mut collector = Collector::default();
        let mut message = ScoreRollup::default();
        let mut classes = Vec::new();

        for class_item in &tree.children {
            let mut class_rollup = ScoreRollup::default();
            let mut elements = Vec::new();

            for element_item in &class_item.children {
                let mut element_rollup = ScoreRollup::default();
                for result in element_item.primary_results() {
                    collector.index(result, &mut element_rollup);
                }
                for attribute_item in &element_item.children {
                    for result in attribute_item.primary_results() {
                        collector.index(result, &mut element_rollup);
                    }
                }
                class_rollup.absorb(&element_rollup);
                elements.push(ElementStatistics {
                    path: element_item.path.as_str().to_string(),
                    mnemonic: element_item.entity.mnemonic.clone(),
                    display_name: element_item.entity.display_name.clone(),
                    sequence: element_item.sequence,
                    rollup: element_rollup,
                });
            }

            // Results recorded against the class item itself sit above any
            // element rollup.
            for result in class_item.primary_results() {
                collector.index(result, &mut class_rollup);
            }
            message.absorb(&class_rollup);
            classes.push(ClassStatistics {
                mnemonic: class_item.entity.mnemonic.clone(),
                display_name: class_item.entity.display_name.clone(),
                rollup: class_rollup,
                elements,
            });
        }

        for result in tree.primary_results() {
            collector.index(result, &mut message);
        }

        debug_assert_eq!(tree.item_type, ItemType::Root);
        Statistics {
            message,
            classes,
            critical_failures: collector.critical_failures,
            reasons: collector.reasons,
            informational: collector.informational.into_values().collect(),
        }
    }
}

/// Accumulates the flat indexes while the rollups are folded.
#[derive(Default)]
struct Collector {
    critical_failures: Vec<CriticalFailure>,
    reasons: Vec<ReasonEntry>,
    informational: BTreeMap<(String, String), InformationalTally>,
}

impl Collector {
    fn index(&mut self, result: &EvaluationResult, rollup: &mut ScoreRollup) {
        match result.effect {
            ScoringEffect::Scoring => {
                rollup.record(result);
                if result.state == ProcessingState::Failed && result.is_critical {
                    self.critical_failures.push(CriticalFailure {
                        item_path: result.item_path.as_str().to_string(),
                        criterion_name: result.criterion_name.clone(),
                        sam_mnemonic: result.sam_mnemonic.clone(),
                        reason: result.reason.clone(),
                    });
                }
            }
            ScoringEffect::Informational => {
                rollup.record(result);
                let entity_mnemonic = entity_mnemonic_of(result);
                let tally = self
                    .informational
                    .entry((entity_mnemonic.clone(), result.sam_mnemonic.clone()))
                    .or_insert_with(|| InformationalTally {
                        entity_mnemonic,
                        sam_mnemonic: result.sam_mnemonic.clone(),
                        processed: 0,
                        passed: 0,
                        failed: 0,
                        skipped: 0,
                    });
                match result.state {
                    ProcessingState::Passed => {
                        tally.processed += 1;
                        tally.passed += 1;
                    }
                    ProcessingState::Failed => {
                        tally.processed += 1;
                        tally.failed += 1;
                    }
                    ProcessingState::Skipped => tally.skipped += 1,
                    ProcessingState::Pending => {}
                }
            }
        }

        if matches!(
            result.state,
            ProcessingState::Skipped | ProcessingState::Failed
        ) {
            self.reasons.push(ReasonEntry {
                item_path: result.item_path.as_str().to_string(),
                criterion_name: result.criterion_name.clone(),
                sam_mnemonic: result.sam_mnemonic.clone(),
                state: result.state,
                reason: result.reason.clone(),
            });
        }
    }
}

/// Last entity segment of the result's item path (element segments carry a
/// `.sequence` suffix that is not part of the mnemonic).
fn entity_mnemonic_of(result: &EvaluationResult) -> String {
    let last = result
        .item_path
        .as_str()
        .rsplit('|')
        .next()
        .unwrap_or_default();
    last.split('.').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    use super::*;
    use crate::model::item::ItemPath;
    use crate::result::EvaluationResult;
    use crate::rubric::test_support::scoring_criterion;

    fn passed(weight: u64) -> EvaluationResult {
        let criterion = scoring_criterion("obx-value", "value-present", weight);
        let path = ItemPath::root("msg").child("obx-value");
        let mut result = EvaluationResult::primary(&path, &criterion);
        result.mark_passed();
        result
    }

    fn failed(weight: u64, critical: bool) -> EvaluationResult {
        let mut criterion = scoring_criterion("obx-value", "value-present", weight);
        criterion.is_critical = critical;
        let path = ItemPath::root("msg").child("obx-value");
        let mut result = EvaluationResult::primary(&path, &criterion);
        result.mark_failed("value-present", Some("absent".into()));
        result
    }

    fn skipped(weight: u64) -> EvaluationResult {
        let criterion = scoring_criterion("obx-value", "value-present", weight);
        let path = ItemPath::root("msg").child("obx-value");
        let mut result = EvaluationResult::primary(&path, &criterion);
        result.mark_skipped("condition not met");
        result
    }

    #[test]
    fn single_passing_criterion_scores_one_hundred() {
        let mut rollup = ScoreRollup::default();
        rollup.record(&passed(1));
        assert_eq!(rollup.count, 1);
        assert_eq!(rollup.passed, 1);
        assert_eq!(rollup.score(), 100);
        assert_eq!(rollup.weighted_score(), 100);
    }

    #[test]
    fn weighted_failure_truncates_the_score() {
        // weights 1 (critical fail) and 3 (pass): weighted 3/4 = 75.
        let mut rollup = ScoreRollup::default();
        rollup.record(&failed(1, true));
        rollup.record(&passed(3));
        assert_eq!(rollup.weighted_count, 4);
        assert_eq!(rollup.weighted_passed, 3);
        assert_eq!(rollup.weighted_score(), 75);
        assert_eq!(rollup.score(), 50);
        assert_eq!(rollup.critical_failures, 1);
    }

    #[test]
    fn skips_never_reach_a_denominator() {
        let mut rollup = ScoreRollup::default();
        rollup.record(&skipped(5));
        rollup.record(&passed(1));
        assert_eq!(rollup.skipped, 1);
        assert_eq!(rollup.count, 1);
        assert_eq!(rollup.score(), 100);
    }

    #[test]
    fn zero_denominator_scores_zero() {
        let rollup = ScoreRollup::default();
        assert_eq!(rollup.score(), 0);
        assert_eq!(rollup.weighted_score(), 0);
    }

    #[test]
    fn informational_results_never_touch_the_score() {
        use crate::rubric::ScoringEffect;

        let mut criterion = scoring_criterion("obx-value", "value-present", 7);
        criterion.effect = ScoringEffect::Informational;
        criterion.is_critical = true;
        let path = ItemPath::root("msg").child("obx-value");
        let mut result = EvaluationResult::primary(&path, &criterion);
        result.mark_failed("value-present", None);

        let mut collector = Collector::default();
        let mut rollup = ScoreRollup::default();
        collector.index(&result, &mut rollup);

        assert_eq!(rollup.count, 0);
        assert_eq!(rollup.weighted_count, 0);
        assert_eq!(rollup.critical_failures, 0);
        assert!(collector.critical_failures.is_empty());
        assert_eq!(collector.informational.len(), 1);
        let tally = collector.informational.values().next().unwrap();
        assert_eq!(tally.failed, 1);
    }

    proptest! {
        #[test]
        fn score_stays_within_bounds(
            outcomes in proptest::collection::vec((0u8..3, 1u64..20), 0..40)
        ) {
            let mut rollup = ScoreRollup::default();
            for (kind, weight) in outcomes {
                let result = match kind {
                    0 => passed(weight),
                    1 => failed(weight, weight % 2 == 0),
                    _ => skipped(weight),
                };
                rollup.record(&result);
            }
            prop_assert!(rollup.score() <= 100);
            prop_assert!(rollup.weighted_score() <= 100);
            if rollup.count == 0 {
                prop_assert_eq!(rollup.score(), 0);
            }
        }

        #[test]
        fn absorb_matches_recording_in_sequence(
            left in proptest::collection::vec((0u8..3, 1u64..20), 0..20),
            right in proptest::collection::vec((0u8..3, 1u64..20), 0..20),
        ) {
            let build = |outcomes: &[(u8, u64)]| {
                let mut rollup = ScoreRollup::default();
                for &(kind, weight) in outcomes {
                    let result = match kind {
                        0 => passed(weight),
                        1 => failed(weight, false),
                        _ => skipped(weight),
                    };
                    rollup.record(&result);
                }
                rollup
            };
            let mut combined = build(&left);
            combined.absorb(&build(&right));

            let mut sequential = ScoreRollup::default();
            for &(kind, weight) in left.iter().chain(right.iter()) {
                let result = match kind {
                    0 => passed(weight),
                    1 => failed(weight, false),
                    _ => skipped(weight),
                };
                sequential.record(&result);
            }
            prop_assert_eq!(combined, sequential);
        }
    }
}
