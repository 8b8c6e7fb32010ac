//! Audit document rendering: a mechanical walk over the completed result
//! tree and its statistics, producing a JSON-serializable trail isomorphic
//! to the message's class → element → attribute shape.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::bundle::ReferenceBundle;
use crate::model::item::EvaluationItem;
use crate::result::{EvaluationResult, ProcessingState};
use crate::stats::{ScoreRollup, Statistics};

#[derive(Debug, Clone, Serialize)]
pub struct AuditDocument {
    pub evaluation_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub rubric: String,
    pub rubric_version: String,
    pub model_version: String,
    pub score: u64,
    pub weighted_score: u64,
    pub critical_failures: u64,
    pub outcomes: Vec<AuditOutcome>,
    pub classes: Vec<AuditClass>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditClass {
    pub mnemonic: String,
    pub display_name: String,
    pub score: u64,
    pub weighted_score: u64,
    pub rollup: ScoreRollup,
    pub elements: Vec<AuditElement>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditElement {
    pub mnemonic: String,
    pub display_name: String,
    pub sequence: u32,
    pub score: u64,
    pub weighted_score: u64,
    pub rollup: ScoreRollup,
    pub outcomes: Vec<AuditOutcome>,
    pub attributes: Vec<AuditAttribute>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuditAttribute {
    pub mnemonic: String,
    pub display_name: String,
    pub value: Option<String>,
    pub outcomes: Vec<AuditOutcome>,
}

/// One assessment outcome as shown in the trail. Conditional and dependent
/// records are included with their markers so a reviewer can follow the
/// whole chain, in execution order.
#[derive(Debug, Clone, Serialize)]
pub struct AuditOutcome {
    pub criterion: String,
    pub method: String,
    pub state: ProcessingState,
    pub weight: u64,
    pub critical: bool,
    pub conditional: bool,
    pub dependent: bool,
    pub reason: Option<String>,
}

impl AuditOutcome {
    fn from_result(result: &EvaluationResult) -> Self {
        Self {
            criterion: result.criterion_name.clone(),
            method: result.sam_mnemonic.clone(),
            state: result.state,
            weight: result.weight,
            critical: result.is_critical,
            conditional: result.is_conditional,
            dependent: result.is_dependent,
            reason: result.reason.clone(),
        }
    }
}

fn outcomes_of(item: &EvaluationItem) -> Vec<AuditOutcome> {
    item.results.iter().map(AuditOutcome::from_result).collect()
}

/// Render the trail for a completed evaluation. The tree and statistics
/// share walk order, so classes and elements line up by position.
pub fn render(
    tree: &EvaluationItem,
    statistics: &Statistics,
    bundle: &ReferenceBundle,
) -> AuditDocument {
    let classes = tree
        .children
        .iter()
        .zip(&statistics.classes)
        .map(|(class_item, class_stats)| AuditClass {
            mnemonic: class_item.entity.mnemonic.clone(),
            display_name: class_item.entity.display_name.clone(),
            score: class_stats.rollup.score(),
            weighted_score: class_stats.rollup.weighted_score(),
            rollup: class_stats.rollup,
            elements: class_item
                .children
                .iter()
                .zip(&class_stats.elements)
                .map(|(element_item, element_stats)| AuditElement {
                    mnemonic: element_item.entity.mnemonic.clone(),
                    display_name: element_item.entity.display_name.clone(),
                    sequence: element_item.sequence,
                    score: element_stats.rollup.score(),
                    weighted_score: element_stats.rollup.weighted_score(),
                    rollup: element_stats.rollup,
                    outcomes: outcomes_of(element_item),
                    attributes: element_item
                        .children
                        .iter()
                        .map(|attribute_item| AuditAttribute {
                            mnemonic: attribute_item.entity.mnemonic.clone(),
                            display_name: attribute_item.entity.display_name.clone(),
                            value: attribute_item.data.as_ref().map(|d| d.display_value()),
                            outcomes: outcomes_of(attribute_item),
                        })
                        .collect(),
                })
                .collect(),
        })
        .collect();

    AuditDocument {
        evaluation_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        rubric: bundle.rubric.name.clone(),
        rubric_version: bundle.rubric.version.clone(),
        model_version: bundle.model.version.clone(),
        score: statistics.message.score(),
        weighted_score: statistics.message.weighted_score(),
        critical_failures: statistics.message.critical_failures,
        outcomes: outcomes_of(tree),
        classes,
    }
}
