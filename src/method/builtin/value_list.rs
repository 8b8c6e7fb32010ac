use async_trait::async_trait;

use super::VALUE_LIST_MEMBER;
use crate::error::EngineResult;
use crate::method::{AssessmentMethod, MethodContext, MethodOutcome};

/// Checks membership in the bundle value list named by the `value-list`
/// parameter. A missing list is a configuration error and aborts the
/// request.
pub struct ValueListMember;

#[async_trait]
impl AssessmentMethod for ValueListMember {
    fn mnemonic(&self) -> &str {
        VALUE_LIST_MEMBER
    }

    async fn evaluate(&self, context: &MethodContext<'_>) -> EngineResult<MethodOutcome> {
        let Some(list_name) = context.parameter("value-list") else {
            return Ok(MethodOutcome::Errored {
                message: "value-list-member dispatched without a 'value-list' parameter".into(),
            });
        };
        let list = context.bundle.value_list(list_name)?;
        let Some(data) = context.data else {
            return Ok(MethodOutcome::failed(format!(
                "'{}' is absent",
                context.entity.display_name
            )));
        };

        let value = data.display_value();
        if list.contains(&value) {
            Ok(MethodOutcome::Succeeded)
        } else {
            Ok(MethodOutcome::failed(format!(
                "value '{value}' is not in list '{list_name}'"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{attribute_entity, empty_bundle};
    use super::*;
    use crate::bundle::ValueList;
    use crate::error::EngineError;
    use crate::model::data::ItemData;
    use crate::model::entity::EntityDataType;
    use crate::rubric::MethodParameter;

    #[tokio::test]
    async fn membership_decides_the_outcome() {
        let entity = attribute_entity(EntityDataType::PlainText);
        let bundle = empty_bundle().with_value_list(ValueList {
            name: "specimen-types".into(),
            values: vec!["BLD".into(), "UR".into()],
        });
        let data = ItemData::text("BLD");
        let context = MethodContext {
            entity: &entity,
            data: Some(&data),
            parameters: vec![MethodParameter::new("value-list", "specimen-types")],
            bundle: &bundle,
        };
        assert_eq!(
            ValueListMember.evaluate(&context).await.unwrap(),
            MethodOutcome::Succeeded
        );

        let stray = ItemData::text("HAIR");
        let context = MethodContext {
            entity: &entity,
            data: Some(&stray),
            parameters: vec![MethodParameter::new("value-list", "specimen-types")],
            bundle: &bundle,
        };
        assert!(matches!(
            ValueListMember.evaluate(&context).await.unwrap(),
            MethodOutcome::Failed { .. }
        ));
    }

    #[tokio::test]
    async fn missing_list_aborts_the_request() {
        let entity = attribute_entity(EntityDataType::PlainText);
        let bundle = empty_bundle();
        let data = ItemData::text("BLD");
        let context = MethodContext {
            entity: &entity,
            data: Some(&data),
            parameters: vec![MethodParameter::new("value-list", "not-loaded")],
            bundle: &bundle,
        };
        assert!(matches!(
            ValueListMember.evaluate(&context).await,
            Err(EngineError::MissingValueList { .. })
        ));
    }
}
