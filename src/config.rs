use serde::{Deserialize, Serialize};

/// Engine-level settings, shared by every request the evaluator serves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Upper bound on prerequisite chain length. Chains are reference data,
    /// so a runaway chain indicates a corrupt bundle rather than a real
    /// rubric; the walk aborts instead of unwinding it.
    #[serde(default = "default_max_chain_depth")]
    pub max_chain_depth: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_chain_depth: default_max_chain_depth(),
        }
    }
}

fn default_max_chain_depth() -> usize {
    16
}

/// Per-request flags supplied by the caller alongside the message tree.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationOptions {
    /// Render the full audit document in addition to the statistics.
    #[serde(default)]
    pub render_audit: bool,
}
