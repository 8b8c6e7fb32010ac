use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Kind of payload an entity's instances carry.
///
/// Structural entities (root, classes, most elements) hold no data of their
/// own; the four typed variants mirror the attribute payload shapes in
/// [`crate::model::data::ItemData`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum EntityDataType {
    #[default]
    Structural,
    PlainText,
    CodedConcept,
    ObservationValue,
    ReferenceRange,
}

/// How many instances of an entity a conforming message may carry under one
/// parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Cardinality {
    ExactlyOne,
    ZeroOrMany,
    OneOrMany,
}

/// One node of the entity model: the schema metadata for a single level of
/// the message (root / class / element / attribute).
///
/// The mnemonic is the entity's stable identity; criteria reference it and
/// evaluation item paths are built from it. Entity trees are read-only
/// reference data, never mutated after the bundle is loaded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub mnemonic: String,
    pub display_name: String,
    #[serde(default)]
    pub data_type: EntityDataType,
    pub cardinality: Cardinality,
    #[serde(default)]
    pub children: Vec<Entity>,
}

impl Entity {
    pub fn new(
        mnemonic: impl Into<String>,
        display_name: impl Into<String>,
        data_type: EntityDataType,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            mnemonic: mnemonic.into(),
            display_name: display_name.into(),
            data_type,
            cardinality,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Entity>) -> Self {
        self.children = children;
        self
    }
}

/// A versioned entity model: the full metadata tree for one message schema
/// version.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityModel {
    pub version: String,
    pub root: Entity,
}

impl EntityModel {
    pub fn new(version: impl Into<String>, root: Entity) -> Self {
        Self {
            version: version.into(),
            root,
        }
    }

    /// Depth-first lookup by mnemonic across the whole tree.
    pub fn find(&self, mnemonic: &str) -> Option<&Entity> {
        fn walk<'a>(entity: &'a Entity, mnemonic: &str) -> Option<&'a Entity> {
            if entity.mnemonic == mnemonic {
                return Some(entity);
            }
            entity.children.iter().find_map(|c| walk(c, mnemonic))
        }
        walk(&self.root, mnemonic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> EntityModel {
        let attribute = Entity::new(
            "obx-value",
            "Observation Value",
            EntityDataType::ObservationValue,
            Cardinality::ExactlyOne,
        );
        let element = Entity::new(
            "obx",
            "Observation",
            EntityDataType::Structural,
            Cardinality::ZeroOrMany,
        )
        .with_children(vec![attribute]);
        let class = Entity::new(
            "order",
            "Order",
            EntityDataType::Structural,
            Cardinality::OneOrMany,
        )
        .with_children(vec![element]);
        let root = Entity::new(
            "message",
            "Message",
            EntityDataType::Structural,
            Cardinality::ExactlyOne,
        )
        .with_children(vec![class]);
        EntityModel::new("2.1", root)
    }

    #[test]
    fn find_locates_nested_entities() {
        let model = sample_model();
        assert_eq!(model.find("obx-value").unwrap().display_name, "Observation Value");
        assert_eq!(model.find("message").unwrap().mnemonic, "message");
        assert!(model.find("missing").is_none());
    }

    #[test]
    fn data_type_round_trips_through_serde() {
        let json = serde_json::to_string(&EntityDataType::CodedConcept).unwrap();
        assert_eq!(json, "\"coded-concept\"");
        let back: EntityDataType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, EntityDataType::CodedConcept);
    }
}
