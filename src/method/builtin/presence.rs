use async_trait::async_trait;

use super::VALUE_PRESENT;
use crate::error::EngineResult;
use crate::method::{AssessmentMethod, MethodContext, MethodOutcome};

/// Fails when the item carries no data, or data with no usable content.
/// The deepest prerequisite of most chains.
pub struct ValuePresent;

#[async_trait]
impl AssessmentMethod for ValuePresent {
    fn mnemonic(&self) -> &str {
        VALUE_PRESENT
    }

    async fn evaluate(&self, context: &MethodContext<'_>) -> EngineResult<MethodOutcome> {
        let outcome = match context.data {
            Some(data) if !data.is_empty() => MethodOutcome::Succeeded,
            Some(_) => MethodOutcome::failed(format!(
                "'{}' is present but empty",
                context.entity.display_name
            )),
            None => MethodOutcome::failed(format!("'{}' is absent", context.entity.display_name)),
        };
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{attribute_entity, empty_bundle};
    use super::*;
    use crate::model::data::ItemData;
    use crate::model::entity::EntityDataType;

    #[tokio::test]
    async fn absent_and_blank_values_fail() {
        let entity = attribute_entity(EntityDataType::PlainText);
        let bundle = empty_bundle();

        let absent = MethodContext {
            entity: &entity,
            data: None,
            parameters: Vec::new(),
            bundle: &bundle,
        };
        assert!(matches!(
            ValuePresent.evaluate(&absent).await.unwrap(),
            MethodOutcome::Failed { .. }
        ));

        let blank_data = ItemData::text("  ");
        let blank = MethodContext {
            entity: &entity,
            data: Some(&blank_data),
            parameters: Vec::new(),
            bundle: &bundle,
        };
        assert!(matches!(
            ValuePresent.evaluate(&blank).await.unwrap(),
            MethodOutcome::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn populated_value_succeeds() {
        let entity = attribute_entity(EntityDataType::PlainText);
        let bundle = empty_bundle();
        let data = ItemData::text("NEGATIVE");
        let context = MethodContext {
            entity: &entity,
            data: Some(&data),
            parameters: Vec::new(),
            bundle: &bundle,
        };
        assert_eq!(
            ValuePresent.evaluate(&context).await.unwrap(),
            MethodOutcome::Succeeded
        );
    }
}
