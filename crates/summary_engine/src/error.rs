use crate::{request::MAX_SUMMARY_TOKENS, ModelName};

/// Engine failure taxonomy.
///
/// Input truncation is deliberately absent: over-length notes are bounded
/// and logged, not failed.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The model weights or tokenizer could not be fetched or initialized.
    /// Unrecoverable for that load attempt; callers retry `load` from scratch.
    #[error("failed to load model: {message}")]
    ModelLoad { message: String },

    /// The underlying generation computation failed or exceeded its time
    /// budget. Surfaced per request; prior results are untouched.
    #[error("generation failed: {message}")]
    Generation { message: String },

    /// The request was rejected before any generation was attempted.
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),
}

impl EngineError {
    pub(crate) fn load(model: ModelName, err: impl std::fmt::Display) -> Self {
        EngineError::ModelLoad {
            message: format!("{model}: {err}"),
        }
    }

    pub(crate) fn generation(err: impl std::fmt::Display) -> Self {
        EngineError::Generation {
            message: err.to_string(),
        }
    }
}

/// User-correctable request problems, caught at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("note text is empty")]
    EmptyText,

    #[error("length bounds must be at least 1 token")]
    ZeroLength,

    #[error("min_length {min} exceeds max_length {max}")]
    MinExceedsMax { min: usize, max: usize },

    #[error("max_length {max} exceeds the supported limit of {MAX_SUMMARY_TOKENS} tokens")]
    MaxTooLarge { max: usize },
}
