use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::warn;

use super::builtin;
use super::{AssessmentMethod, MethodContext, MethodOutcome};
use crate::error::EngineResult;

/// Maps method mnemonics to implementations.
///
/// Unknown mnemonics resolve to a fallback that always fails (never
/// errors): a rubric referencing an unimplemented method shows up as a
/// failed criterion in the scoring output instead of aborting the request,
/// which keeps the misconfiguration visible where rubric authors look.
pub struct MethodRegistry {
    methods: DashMap<String, Arc<dyn AssessmentMethod>>,
    fallback: Arc<dyn AssessmentMethod>,
}

impl MethodRegistry {
    pub fn new() -> Self {
        Self {
            methods: DashMap::new(),
            fallback: Arc::new(UnimplementedMethod),
        }
    }

    /// Registry pre-populated with the built-in method set.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        builtin::register_all(&registry);
        registry
    }

    pub fn register(&self, method: Arc<dyn AssessmentMethod>) {
        self.methods.insert(method.mnemonic().to_string(), method);
    }

    pub fn contains(&self, mnemonic: &str) -> bool {
        self.methods.contains_key(mnemonic)
    }

    pub fn resolve(&self, mnemonic: &str) -> Arc<dyn AssessmentMethod> {
        match self.methods.get(mnemonic) {
            Some(entry) => Arc::clone(entry.value()),
            None => {
                warn!(%mnemonic, "no assessment method implementation registered; defaulting to failure");
                Arc::clone(&self.fallback)
            }
        }
    }
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Fallback for mnemonics with no registered implementation.
struct UnimplementedMethod;

#[async_trait]
impl AssessmentMethod for UnimplementedMethod {
    fn mnemonic(&self) -> &str {
        "unimplemented"
    }

    async fn evaluate(&self, _context: &MethodContext<'_>) -> EngineResult<MethodOutcome> {
        Ok(MethodOutcome::failed(
            "no implementation registered for the requested assessment method",
        ))
    }
}
