use async_trait::async_trait;

use super::numeric::parse_numeric;
use super::OBSERVATION_IN_RANGE;
use crate::error::EngineResult;
use crate::method::{AssessmentMethod, MethodContext, MethodOutcome};
use crate::model::data::ItemData;

/// Checks that a numeric observation falls inside its reference range.
/// Prerequisite: `numeric-value` (which itself requires `value-present`),
/// so non-numeric data reaching this method is an implementation fault.
/// Items without an attached range are skipped, not failed: the absence of
/// a range is a completeness question for a different criterion.
pub struct ObservationInRange;

#[async_trait]
impl AssessmentMethod for ObservationInRange {
    fn mnemonic(&self) -> &str {
        OBSERVATION_IN_RANGE
    }

    async fn evaluate(&self, context: &MethodContext<'_>) -> EngineResult<MethodOutcome> {
        let Some(data) = context.data else {
            return Ok(MethodOutcome::Errored {
                message: format!(
                    "observation-in-range reached '{}' without data",
                    context.entity.mnemonic
                ),
            });
        };
        let Some(value) = parse_numeric(data) else {
            return Ok(MethodOutcome::Errored {
                message: format!(
                    "observation-in-range reached non-numeric value '{}'",
                    data.display_value()
                ),
            });
        };
        let range = match data {
            ItemData::ObservationValue(observation) => observation.reference_range.as_ref(),
            _ => None,
        };
        let Some(range) = range else {
            return Ok(MethodOutcome::Skipped {
                reason: format!("'{}' carries no reference range", context.entity.display_name),
            });
        };

        if range.contains(value) {
            Ok(MethodOutcome::Succeeded)
        } else {
            Ok(MethodOutcome::failed(format!(
                "value {value} is outside the reference range {}",
                range.text.clone().unwrap_or_else(|| format!(
                    "{}-{}",
                    range.low.map(|v| v.to_string()).unwrap_or_default(),
                    range.high.map(|v| v.to_string()).unwrap_or_default()
                ))
            )))
        }
    }
}
