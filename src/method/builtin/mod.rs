//! Built-in assessment methods.
//!
//! Each method is a small, independently tested predicate over one item.
//! Production deployments register further site-specific methods on top of
//! these; nothing here is special-cased by the dispatcher.

mod code_system;
mod numeric;
mod pattern;
mod presence;
mod range;
mod unit;
mod value_list;

use std::sync::Arc;

use super::registry::MethodRegistry;
use crate::rubric::{ParameterType, SamDefinition};

pub use code_system::CodedConceptValid;
pub use numeric::NumericValue;
pub use pattern::TextPattern;
pub use presence::ValuePresent;
pub use range::ObservationInRange;
pub use unit::{UnitOfMeasureValid, DEFAULT_UNIT_CODE_SYSTEM};
pub use value_list::ValueListMember;

pub const VALUE_PRESENT: &str = "value-present";
pub const TEXT_PATTERN: &str = "text-pattern";
pub const VALUE_LIST_MEMBER: &str = "value-list-member";
pub const CODED_CONCEPT_VALID: &str = "coded-concept-valid";
pub const NUMERIC_VALUE: &str = "numeric-value";
pub const OBSERVATION_IN_RANGE: &str = "observation-in-range";
pub const UNIT_OF_MEASURE_VALID: &str = "unit-of-measure-valid";

pub fn register_all(registry: &MethodRegistry) {
    registry.register(Arc::new(ValuePresent));
    registry.register(Arc::new(TextPattern));
    registry.register(Arc::new(ValueListMember));
    registry.register(Arc::new(CodedConceptValid));
    registry.register(Arc::new(NumericValue));
    registry.register(Arc::new(ObservationInRange));
    registry.register(Arc::new(UnitOfMeasureValid));
}

/// Canonical [`SamDefinition`] set for the built-in methods: the declared
/// parameters and prerequisite chains the implementations assume. Bundles
/// load these instead of re-deriving the chains by hand.
pub fn definitions() -> Vec<SamDefinition> {
    vec![
        SamDefinition::new(VALUE_PRESENT),
        SamDefinition::new(TEXT_PATTERN).with_parameter("pattern", ParameterType::Text),
        SamDefinition::new(VALUE_LIST_MEMBER).with_parameter("value-list", ParameterType::Text),
        SamDefinition::new(CODED_CONCEPT_VALID)
            .with_prerequisite(VALUE_PRESENT)
            .with_parameter("code-system", ParameterType::Text),
        SamDefinition::new(NUMERIC_VALUE).with_prerequisite(VALUE_PRESENT),
        SamDefinition::new(OBSERVATION_IN_RANGE).with_prerequisite(NUMERIC_VALUE),
        // code-system is deliberately undeclared: the method defaults to
        // UCUM when no parameter is supplied.
        SamDefinition::new(UNIT_OF_MEASURE_VALID).with_prerequisite(VALUE_PRESENT),
    ]
}
