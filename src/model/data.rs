use serde::{Deserialize, Serialize};

/// A coded value drawn from a terminology (code system).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodedConcept {
    pub code: String,
    #[serde(default)]
    pub display: Option<String>,
    #[serde(default)]
    pub code_system: Option<String>,
}

/// Numeric bounds an observation is expected to fall within. Either bound
/// may be open; `text` preserves the original range notation for audit
/// output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReferenceRange {
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
}

impl ReferenceRange {
    pub fn contains(&self, value: f64) -> bool {
        self.low.is_none_or(|low| value >= low) && self.high.is_none_or(|high| value <= high)
    }
}

/// A reported observation value. The value is kept as text because messages
/// carry both numeric and narrative results; numeric interpretation is an
/// assessment concern, not a parsing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationValue {
    pub value: String,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub reference_range: Option<ReferenceRange>,
}

/// Typed payload of one attribute item, as produced by the message parser.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ItemData {
    PlainText { value: String },
    CodedConcept(CodedConcept),
    ObservationValue(ObservationValue),
    ReferenceRange(ReferenceRange),
}

impl ItemData {
    pub fn text(value: impl Into<String>) -> Self {
        ItemData::PlainText {
            value: value.into(),
        }
    }

    /// True when the payload carries no usable content. Absent attributes
    /// surface as items with no data at all; this covers the present-but-
    /// blank case.
    pub fn is_empty(&self) -> bool {
        match self {
            ItemData::PlainText { value } => value.trim().is_empty(),
            ItemData::CodedConcept(concept) => concept.code.trim().is_empty(),
            ItemData::ObservationValue(observation) => observation.value.trim().is_empty(),
            ItemData::ReferenceRange(range) => {
                range.low.is_none() && range.high.is_none() && range.text.is_none()
            }
        }
    }

    /// Text rendering used by audit output and by text-oriented assessments.
    pub fn display_value(&self) -> String {
        match self {
            ItemData::PlainText { value } => value.clone(),
            ItemData::CodedConcept(concept) => concept
                .display
                .clone()
                .unwrap_or_else(|| concept.code.clone()),
            ItemData::ObservationValue(observation) => match &observation.unit {
                Some(unit) => format!("{} {}", observation.value, unit),
                None => observation.value.clone(),
            },
            ItemData::ReferenceRange(range) => range.text.clone().unwrap_or_else(|| {
                format!(
                    "{}-{}",
                    range.low.map(|v| v.to_string()).unwrap_or_default(),
                    range.high.map(|v| v.to_string()).unwrap_or_default()
                )
            }),
        }
    }
}
