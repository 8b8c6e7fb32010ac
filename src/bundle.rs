use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::model::entity::EntityModel;
use crate::rubric::{Rubric, SamDefinition};

/// A named, ordered list of permitted values (e.g. specimen types a site
/// accepts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValueList {
    pub name: String,
    pub values: Vec<String>,
}

impl ValueList {
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// A terminology: the set of codes a coded concept may legitimately carry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeSystem {
    pub name: String,
    pub codes: BTreeSet<String>,
}

impl CodeSystem {
    pub fn new(name: impl Into<String>, codes: impl IntoIterator<Item = String>) -> Self {
        Self {
            name: name.into(),
            codes: codes.into_iter().collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }
}

/// All reference data one request evaluates against: the rubric, the entity
/// model matching the message's schema version, the assessment method
/// definitions, and the auxiliary lookup tables.
///
/// The bundle is assembled by the reference-data collaborator before
/// evaluation starts and passed by reference through every call; the engine
/// never stores or mutates it. Lookup misses are configuration errors,
/// fatal to the whole request.
#[derive(Debug, Clone)]
pub struct ReferenceBundle {
    pub rubric: Rubric,
    pub model: EntityModel,
    sam_definitions: HashMap<String, SamDefinition>,
    value_lists: HashMap<String, ValueList>,
    code_systems: HashMap<String, CodeSystem>,
}

impl ReferenceBundle {
    pub fn new(rubric: Rubric, model: EntityModel) -> Self {
        Self {
            rubric,
            model,
            sam_definitions: HashMap::new(),
            value_lists: HashMap::new(),
            code_systems: HashMap::new(),
        }
    }

    pub fn with_definitions(mut self, definitions: impl IntoIterator<Item = SamDefinition>) -> Self {
        for definition in definitions {
            self.sam_definitions
                .insert(definition.mnemonic.clone(), definition);
        }
        self
    }

    pub fn with_value_list(mut self, list: ValueList) -> Self {
        self.value_lists.insert(list.name.clone(), list);
        self
    }

    pub fn with_code_system(mut self, system: CodeSystem) -> Self {
        self.code_systems.insert(system.name.clone(), system);
        self
    }

    pub fn sam_definition(&self, mnemonic: &str) -> EngineResult<&SamDefinition> {
        self.sam_definitions
            .get(mnemonic)
            .ok_or_else(|| EngineError::MissingMethodDefinition {
                mnemonic: mnemonic.to_string(),
            })
    }

    pub fn value_list(&self, name: &str) -> EngineResult<&ValueList> {
        self.value_lists
            .get(name)
            .ok_or_else(|| EngineError::MissingValueList {
                name: name.to_string(),
            })
    }

    pub fn code_system(&self, name: &str) -> EngineResult<&CodeSystem> {
        self.code_systems
            .get(name)
            .ok_or_else(|| EngineError::MissingCodeSystem {
                name: name.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::{Cardinality, Entity, EntityDataType};

    fn bundle() -> ReferenceBundle {
        let root = Entity::new(
            "msg",
            "Message",
            EntityDataType::Structural,
            Cardinality::ExactlyOne,
        );
        ReferenceBundle::new(Rubric::new("lab", "1.0"), EntityModel::new("2.1", root))
    }

    #[test]
    fn missing_definition_is_a_configuration_error() {
        let err = bundle().sam_definition("no-such-method").unwrap_err();
        assert!(matches!(
            err,
            EngineError::MissingMethodDefinition { mnemonic } if mnemonic == "no-such-method"
        ));
    }

    #[test]
    fn lookups_resolve_registered_reference_data() {
        let bundle = bundle()
            .with_definitions([SamDefinition::new("value-present")])
            .with_value_list(ValueList {
                name: "specimen-types".into(),
                values: vec!["BLD".into(), "UR".into()],
            })
            .with_code_system(CodeSystem::new("UCUM", ["mg/dL".to_string()]));

        assert!(bundle.sam_definition("value-present").is_ok());
        assert!(bundle.value_list("specimen-types").unwrap().contains("UR"));
        assert!(bundle.code_system("UCUM").unwrap().contains("mg/dL"));
        assert!(matches!(
            bundle.value_list("unknown"),
            Err(EngineError::MissingValueList { .. })
        ));
    }
}
