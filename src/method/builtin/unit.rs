use async_trait::async_trait;

use super::UNIT_OF_MEASURE_VALID;
use crate::error::EngineResult;
use crate::method::{AssessmentMethod, MethodContext, MethodOutcome};
use crate::model::data::ItemData;

/// Default code system for unit validation. The resolver injects this as a
/// fixed parameter when the method runs as an intermediate prerequisite,
/// where no criterion parameters apply.
pub const DEFAULT_UNIT_CODE_SYSTEM: &str = "UCUM";

/// Validates an observation's unit code against a unit code system
/// (`code-system` parameter, default UCUM). Unitless observations are
/// skipped: plenty of results (ratios, titers) legitimately carry none.
pub struct UnitOfMeasureValid;

#[async_trait]
impl AssessmentMethod for UnitOfMeasureValid {
    fn mnemonic(&self) -> &str {
        UNIT_OF_MEASURE_VALID
    }

    async fn evaluate(&self, context: &MethodContext<'_>) -> EngineResult<MethodOutcome> {
        let system_name = context
            .parameter("code-system")
            .unwrap_or(DEFAULT_UNIT_CODE_SYSTEM);
        let system = context.bundle.code_system(system_name)?;
        let Some(ItemData::ObservationValue(observation)) = context.data else {
            return Ok(MethodOutcome::Errored {
                message: format!(
                    "unit-of-measure-valid reached '{}' without observation data",
                    context.entity.mnemonic
                ),
            });
        };
        let Some(unit) = &observation.unit else {
            return Ok(MethodOutcome::Skipped {
                reason: format!("'{}' carries no unit", context.entity.display_name),
            });
        };

        if system.contains(unit) {
            Ok(MethodOutcome::Succeeded)
        } else {
            Ok(MethodOutcome::failed(format!(
                "unit '{unit}' is not in code system '{system_name}'"
            )))
        }
    }
}
