use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::model::data::ItemData;
use crate::model::entity::Entity;
use crate::result::EvaluationResult;

/// Level of the evaluation tree an item sits at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ItemType {
    Root,
    Class,
    Element,
    Attribute,
}

/// Composite key of one evaluation item, e.g.
/// `message|order|obx.2|obx-value`. Element segments carry their 1-based
/// sequence so repeating elements stay distinguishable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemPath(String);

impl ItemPath {
    pub fn root(mnemonic: &str) -> Self {
        ItemPath(mnemonic.to_string())
    }

    pub fn child(&self, mnemonic: &str) -> Self {
        ItemPath(format!("{}|{}", self.0, mnemonic))
    }

    pub fn element_child(&self, mnemonic: &str, sequence: u32) -> Self {
        ItemPath(format!("{}|{}.{}", self.0, mnemonic, sequence))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One instantiated node of the evaluation tree: the pairing of an entity
/// with the message data (possibly absent) found at that position, plus the
/// evaluation results accumulated against it.
///
/// Items are built once per message by the parsing collaborator; the engine
/// only appends results. Element items carry a 1-based sequence scoped to
/// their parent class so repeated elements (e.g. multiple observations)
/// each get their own node.
#[derive(Debug, Clone)]
pub struct EvaluationItem {
    pub entity: Arc<Entity>,
    pub item_type: ItemType,
    pub path: ItemPath,
    /// 1-based position under the parent class; 1 for non-element items.
    pub sequence: u32,
    pub data: Option<ItemData>,
    pub children: Vec<EvaluationItem>,
    pub results: Vec<EvaluationResult>,
}

impl EvaluationItem {
    pub fn root(entity: Arc<Entity>) -> Self {
        let path = ItemPath::root(&entity.mnemonic);
        Self::new(entity, ItemType::Root, path, 1, None)
    }

    pub fn new(
        entity: Arc<Entity>,
        item_type: ItemType,
        path: ItemPath,
        sequence: u32,
        data: Option<ItemData>,
    ) -> Self {
        Self {
            entity,
            item_type,
            path,
            sequence,
            data,
            children: Vec::new(),
            results: Vec::new(),
        }
    }

    /// Attach a class item under the root and return a reference to it.
    pub fn add_class(&mut self, entity: Arc<Entity>) -> &mut EvaluationItem {
        let path = self.path.child(&entity.mnemonic);
        self.children
            .push(EvaluationItem::new(entity, ItemType::Class, path, 1, None));
        self.children.last_mut().unwrap()
    }

    /// Attach an element item, assigning the next sequence number for its
    /// entity under this class.
    pub fn add_element(&mut self, entity: Arc<Entity>) -> &mut EvaluationItem {
        let sequence = self
            .children
            .iter()
            .filter(|c| c.entity.mnemonic == entity.mnemonic)
            .count() as u32
            + 1;
        let path = self.path.element_child(&entity.mnemonic, sequence);
        self.children.push(EvaluationItem::new(
            entity,
            ItemType::Element,
            path,
            sequence,
            None,
        ));
        self.children.last_mut().unwrap()
    }

    /// Attach an attribute item. Absent attributes are represented with
    /// `data = None` so presence checks still have a node to run against.
    pub fn add_attribute(&mut self, entity: Arc<Entity>, data: Option<ItemData>) -> &mut EvaluationItem {
        let path = self.path.child(&entity.mnemonic);
        self.children.push(EvaluationItem::new(
            entity,
            ItemType::Attribute,
            path,
            1,
            data,
        ));
        self.children.last_mut().unwrap()
    }

    /// Primary results only: the per-criterion outcomes that feed scoring.
    /// Conditional and dependent records stay visible for audit but are
    /// excluded here.
    pub fn primary_results(&self) -> impl Iterator<Item = &EvaluationResult> {
        self.results.iter().filter(|r| r.is_primary())
    }

    /// Order the whole subtree into the walk order the audit contract
    /// requires: classes by entity display name, elements by sequence,
    /// attributes by entity display name. Sorting is stable, so equal keys
    /// keep message order.
    pub fn sort_for_walk(&mut self) {
        match self.item_type {
            ItemType::Root => self
                .children
                .sort_by(|a, b| a.entity.display_name.cmp(&b.entity.display_name)),
            ItemType::Class => self.children.sort_by_key(|c| c.sequence),
            ItemType::Element => self
                .children
                .sort_by(|a, b| a.entity.display_name.cmp(&b.entity.display_name)),
            ItemType::Attribute => {}
        }
        for child in &mut self.children {
            child.sort_for_walk();
        }
    }
}
