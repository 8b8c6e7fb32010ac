use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use uuid::Uuid;

/// Whether a criterion's outcome feeds the quality score or is recorded for
/// information only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ScoringEffect {
    Scoring,
    Informational,
}

/// A name/value pair supplied to an assessment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MethodParameter {
    pub name: String,
    pub value: String,
}

impl MethodParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One rubric rule: binds a target entity to an assessment method, with the
/// scoring weight, criticality and ordering the aggregation relies on.
/// Criteria are reference data, immutable for the lifetime of a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationCriterion {
    pub id: Uuid,
    pub entity_mnemonic: String,
    pub sam_mnemonic: String,
    #[serde(default)]
    pub parameters: Vec<MethodParameter>,
    /// Guard method: when it fails, the primary method is skipped rather
    /// than evaluated.
    #[serde(default)]
    pub condition_sam: Option<String>,
    #[serde(default)]
    pub condition_parameters: Vec<MethodParameter>,
    /// Execution order among the criteria of one item (ties broken by
    /// rubric order).
    pub sequence: u32,
    pub effect: ScoringEffect,
    pub weight: u64,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl EvaluationCriterion {
    /// Name used in audit output: explicit override, else the method
    /// mnemonic.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.sam_mnemonic.clone())
    }
}

/// An ordered rubric: the full criteria list for one message schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rubric {
    pub name: String,
    pub version: String,
    pub criteria: Vec<EvaluationCriterion>,
}

impl Rubric {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            criteria: Vec::new(),
        }
    }

    /// Criteria targeting the given entity, in execution order (criterion
    /// sequence, stable on ties).
    pub fn criteria_for(&self, entity_mnemonic: &str) -> Vec<&EvaluationCriterion> {
        let mut applicable: Vec<&EvaluationCriterion> = self
            .criteria
            .iter()
            .filter(|c| c.entity_mnemonic == entity_mnemonic)
            .collect();
        applicable.sort_by_key(|c| c.sequence);
        applicable
    }
}

/// Declared shape of one method parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterDefinition {
    pub name: String,
    pub data_type: ParameterType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ParameterType {
    Text,
    Number,
    Flag,
}

/// Descriptor for one assessment method: its dispatch key, its declared
/// parameter schema, and the optional single prerequisite that makes
/// methods form singly-linked chains (never a general DAG).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamDefinition {
    pub mnemonic: String,
    #[serde(default)]
    pub prerequisite: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterDefinition>,
    #[serde(default)]
    pub description: Option<String>,
}

impl SamDefinition {
    pub fn new(mnemonic: impl Into<String>) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            prerequisite: None,
            parameters: Vec::new(),
            description: None,
        }
    }

    pub fn with_prerequisite(mut self, prerequisite: impl Into<String>) -> Self {
        self.prerequisite = Some(prerequisite.into());
        self
    }

    pub fn with_parameter(mut self, name: impl Into<String>, data_type: ParameterType) -> Self {
        self.parameters.push(ParameterDefinition {
            name: name.into(),
            data_type,
        });
        self
    }
}
