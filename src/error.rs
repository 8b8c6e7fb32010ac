use thiserror::Error;

/// Fatal faults that abort an evaluation request.
///
/// Business outcomes (a criterion passing, failing or being skipped) are
/// never errors; they are recorded as [`crate::result::EvaluationResult`]
/// values. `EngineError` covers the two unrecoverable cases: an internally
/// inconsistent reference bundle, and an assessment method implementation
/// raising an internal fault. Neither can be locally recovered from, so the
/// whole request fails with no partial score.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no assessment method definition for mnemonic '{mnemonic}'")]
    MissingMethodDefinition { mnemonic: String },

    #[error("prerequisite chain cycles back through '{mnemonic}'")]
    PrerequisiteCycle { mnemonic: String },

    #[error("prerequisite chain for '{mnemonic}' exceeds the configured depth limit")]
    ChainTooDeep { mnemonic: String },

    #[error("no value list named '{name}' in the reference bundle")]
    MissingValueList { name: String },

    #[error("no code system named '{name}' in the reference bundle")]
    MissingCodeSystem { name: String },

    #[error("assessment method '{mnemonic}' raised an internal error: {message}")]
    MethodError { mnemonic: String, message: String },

    #[error("malformed reference data: {0}")]
    MalformedReference(String),
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;
