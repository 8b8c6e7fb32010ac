use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

use crate::model::item::ItemPath;
use crate::rubric::{EvaluationCriterion, ScoringEffect};

/// Lifecycle of an evaluation result. `Pending` transitions once into one
/// of the three terminal states and never again; re-evaluation is a bug.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ProcessingState {
    Pending,
    Passed,
    Failed,
    Skipped,
}

/// Outcome of evaluating one (item, criterion) pair against one assessment
/// method of its dependency chain.
///
/// Weight and criticality are copied from the criterion at creation time so
/// later rubric edits cannot retroactively change a recorded result. The
/// `conditional` and `dependent` markers flag guard-check and prerequisite
/// records; those are kept for audit output but excluded from scoring and
/// ordering, leaving at most one primary result per (item, criterion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub item_path: ItemPath,
    pub criterion_id: Uuid,
    /// Display name for audit output: the criterion's name override when
    /// present, otherwise its target method mnemonic.
    pub criterion_name: String,
    /// Mnemonic of the method this record reports on. For a failed chain
    /// this is the specific method that failed, not the chain target.
    pub sam_mnemonic: String,
    pub state: ProcessingState,
    pub effect: ScoringEffect,
    pub weight: u64,
    pub is_critical: bool,
    pub is_conditional: bool,
    pub is_dependent: bool,
    pub reason: Option<String>,
}

impl EvaluationResult {
    fn pending(
        item_path: &ItemPath,
        criterion: &EvaluationCriterion,
        sam_mnemonic: &str,
        is_conditional: bool,
        is_dependent: bool,
    ) -> Self {
        Self {
            item_path: item_path.clone(),
            criterion_id: criterion.id,
            criterion_name: criterion.display_name(),
            sam_mnemonic: sam_mnemonic.to_string(),
            state: ProcessingState::Pending,
            effect: criterion.effect,
            weight: criterion.weight,
            is_critical: criterion.is_critical,
            is_conditional,
            is_dependent,
            reason: None,
        }
    }

    /// The single scoring-relevant result for a criterion.
    pub fn primary(item_path: &ItemPath, criterion: &EvaluationCriterion) -> Self {
        Self::pending(item_path, criterion, &criterion.sam_mnemonic, false, false)
    }

    /// Guard-check record for a criterion's conditional method.
    pub fn conditional(
        item_path: &ItemPath,
        criterion: &EvaluationCriterion,
        guard_mnemonic: &str,
    ) -> Self {
        Self::pending(item_path, criterion, guard_mnemonic, true, false)
    }

    /// Prerequisite-step record produced while walking a chain.
    pub fn dependent(
        item_path: &ItemPath,
        criterion: &EvaluationCriterion,
        sam_mnemonic: &str,
        within_guard: bool,
    ) -> Self {
        Self::pending(item_path, criterion, sam_mnemonic, within_guard, true)
    }

    pub fn is_primary(&self) -> bool {
        !self.is_conditional && !self.is_dependent
    }

    pub fn is_terminal(&self) -> bool {
        self.state != ProcessingState::Pending
    }

    pub fn mark_passed(&mut self) {
        debug_assert!(!self.is_terminal(), "result re-evaluated after {}", self.state);
        self.state = ProcessingState::Passed;
    }

    /// Record a failure, citing the specific method in the chain that
    /// failed.
    pub fn mark_failed(&mut self, failing_mnemonic: &str, reason: Option<String>) {
        debug_assert!(!self.is_terminal(), "result re-evaluated after {}", self.state);
        self.state = ProcessingState::Failed;
        self.sam_mnemonic = failing_mnemonic.to_string();
        self.reason = reason;
    }

    pub fn mark_skipped(&mut self, reason: impl Into<String>) {
        debug_assert!(!self.is_terminal(), "result re-evaluated after {}", self.state);
        self.state = ProcessingState::Skipped;
        self.reason = Some(reason.into());
    }
}
