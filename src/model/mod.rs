//! Evaluation tree model: entity metadata, typed attribute payloads, and
//! the instantiated item tree the orchestrator walks.

pub mod data;
pub mod entity;
pub mod item;

pub use data::{CodedConcept, ItemData, ObservationValue, ReferenceRange};
pub use entity::{Cardinality, Entity, EntityDataType, EntityModel};
pub use item::{EvaluationItem, ItemPath, ItemType};
