//! # Acuity: Clinical Message Quality Evaluation Engine
//!
//! Acuity scores structured clinical messages against a configurable
//! quality rubric. A parsed message arrives as a tree of typed items
//! (root → class → element → attribute); each item is checked against the
//! rubric criteria that target its entity, every criterion delegating its
//! pass/fail judgment to a named, pluggable assessment method. Outcomes
//! are folded into weighted quality scores and, on request, rendered as a
//! full audit trail.
//!
//! ## Evaluation Pipeline
//!
//! ```text
//! Item Tree + Reference Bundle → Orchestrator → Resolver → Method Dispatch
//!                                      │
//!                                      └→ Result Tree → Statistics → Audit
//! ```
//!
//! 1. The [`orchestrator::Evaluator`] walks the tree in a fixed,
//!    reproducible order and looks up each item's applicable criteria.
//! 2. The [`resolver`] validates criterion parameters, runs the optional
//!    conditional guard, then walks the method's prerequisite chain,
//!    deepest prerequisite first, fail-fast on the first failure.
//! 3. Methods are dispatched through the [`method::MethodRegistry`]; an
//!    unknown mnemonic falls back to an always-fail implementation so
//!    rubric misconfiguration stays visible in scoring output.
//! 4. The [`stats`] engine folds primary results into element-, class-
//!    and message-level rollups; [`audit`] renders the optional trail.
//!
//! ## Outcome classes
//!
//! Pass, fail and skip are business data, recorded on the tree. Fatal
//! faults (an inconsistent reference bundle, a method implementation
//! error) abort the request through [`error::EngineError`]; no partial
//! score is ever returned.

pub mod audit;
pub mod bundle;
pub mod config;
pub mod error;
pub mod method;
pub mod model;
pub mod orchestrator;
pub mod resolver;
pub mod result;
pub mod rubric;
pub mod stats;

pub use audit::AuditDocument;
pub use bundle::{CodeSystem, ReferenceBundle, ValueList};
pub use config::{EngineConfig, EvaluationOptions};
pub use error::{EngineError, EngineResult};
pub use method::{AssessmentMethod, MethodContext, MethodOutcome, MethodRegistry};
pub use model::{
    Cardinality, CodedConcept, Entity, EntityDataType, EntityModel, EvaluationItem, ItemData,
    ItemPath, ItemType, ObservationValue, ReferenceRange,
};
pub use orchestrator::{EvaluationReport, Evaluator};
pub use result::{EvaluationResult, ProcessingState};
pub use rubric::{
    EvaluationCriterion, MethodParameter, ParameterDefinition, ParameterType, Rubric,
    SamDefinition, ScoringEffect,
};
pub use stats::{ScoreRollup, Statistics};
