use async_trait::async_trait;

use super::CODED_CONCEPT_VALID;
use crate::error::EngineResult;
use crate::method::{AssessmentMethod, MethodContext, MethodOutcome};
use crate::model::data::ItemData;

/// Validates a coded concept's code against the code system named by the
/// `code-system` parameter. Prerequisite: `value-present`, so reaching this
/// method with no data at all is an implementation fault.
pub struct CodedConceptValid;

#[async_trait]
impl AssessmentMethod for CodedConceptValid {
    fn mnemonic(&self) -> &str {
        CODED_CONCEPT_VALID
    }

    async fn evaluate(&self, context: &MethodContext<'_>) -> EngineResult<MethodOutcome> {
        let Some(system_name) = context.parameter("code-system") else {
            return Ok(MethodOutcome::Errored {
                message: "coded-concept-valid dispatched without a 'code-system' parameter".into(),
            });
        };
        let system = context.bundle.code_system(system_name)?;
        let Some(ItemData::CodedConcept(concept)) = context.data else {
            return Ok(MethodOutcome::Errored {
                message: format!(
                    "coded-concept-valid reached '{}' without coded data",
                    context.entity.mnemonic
                ),
            });
        };

        if system.contains(&concept.code) {
            Ok(MethodOutcome::Succeeded)
        } else {
            Ok(MethodOutcome::failed(format!(
                "code '{}' is not in code system '{system_name}'",
                concept.code
            )))
        }
    }
}
