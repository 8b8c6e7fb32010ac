//! Assessment method dispatch: the polymorphic predicate contract every
//! check implements, the registry that resolves mnemonics to
//! implementations, and the built-in method set.
//!
//! # Dispatch contract
//!
//! A method is a named, parameterized predicate over one message item. It
//! reports exactly one of four outcomes:
//!
//! - `Succeeded` / `Failed`: ordinary business results, folded into
//!   scoring.
//! - `Skipped`: the check does not apply; excluded from denominators.
//! - `Errored`: an implementation fault (bad cast, missing required
//!   sub-structure). Always fatal to the enclosing request, never a
//!   business outcome.
//!
//! New checks are added by registering a new implementation; the
//! dispatcher itself never changes.

pub mod builtin;
pub mod registry;

use async_trait::async_trait;

use crate::bundle::ReferenceBundle;
use crate::error::EngineResult;
use crate::model::data::ItemData;
use crate::model::entity::Entity;
use crate::rubric::MethodParameter;

pub use registry::MethodRegistry;

/// Terminal outcome of one method execution.
#[derive(Debug, Clone, PartialEq)]
pub enum MethodOutcome {
    Succeeded,
    Failed { reason: Option<String> },
    Skipped { reason: String },
    Errored { message: String },
}

impl MethodOutcome {
    pub fn failed(reason: impl Into<String>) -> Self {
        MethodOutcome::Failed {
            reason: Some(reason.into()),
        }
    }
}

/// Everything a method may read while evaluating one item: the item's typed
/// payload (absent attributes arrive as `None`), its entity metadata, the
/// resolved parameter list for this dispatch, and the request's reference
/// bundle for lookup tables.
pub struct MethodContext<'a> {
    pub entity: &'a Entity,
    pub data: Option<&'a ItemData>,
    pub parameters: Vec<MethodParameter>,
    pub bundle: &'a ReferenceBundle,
}

impl<'a> MethodContext<'a> {
    pub fn parameter(&self, name: &str) -> Option<&str> {
        self.parameters
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value.as_str())
    }
}

/// The capability every assessment method implements.
///
/// Implementations must be stateless with respect to the request: all
/// request-scoped inputs arrive through the context. External calls
/// (terminology lookups, hosted assessments) are the only legitimate
/// suspension points, which is why the contract is async.
#[async_trait]
pub trait AssessmentMethod: Send + Sync {
    /// Dispatch key this implementation answers to.
    fn mnemonic(&self) -> &str;

    async fn evaluate(&self, context: &MethodContext<'_>) -> EngineResult<MethodOutcome>;
}
