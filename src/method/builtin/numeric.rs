use async_trait::async_trait;

use super::NUMERIC_VALUE;
use crate::error::EngineResult;
use crate::method::{AssessmentMethod, MethodContext, MethodOutcome};
use crate::model::data::ItemData;

/// Parses an observation value as a finite number. Prerequisite:
/// `value-present`.
pub struct NumericValue;

pub(super) fn parse_numeric(data: &ItemData) -> Option<f64> {
    let text = match data {
        ItemData::ObservationValue(observation) => observation.value.as_str(),
        ItemData::PlainText { value } => value.as_str(),
        _ => return None,
    };
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

#[async_trait]
impl AssessmentMethod for NumericValue {
    fn mnemonic(&self) -> &str {
        NUMERIC_VALUE
    }

    async fn evaluate(&self, context: &MethodContext<'_>) -> EngineResult<MethodOutcome> {
        let Some(data) = context.data else {
            return Ok(MethodOutcome::Errored {
                message: format!(
                    "numeric-value reached '{}' without data",
                    context.entity.mnemonic
                ),
            });
        };
        match parse_numeric(data) {
            Some(_) => Ok(MethodOutcome::Succeeded),
            None => Ok(MethodOutcome::failed(format!(
                "value '{}' is not numeric",
                data.display_value()
            ))),
        }
    }
}
