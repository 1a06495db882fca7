use crate::{EngineError, ValidationError};

/// Upper bound on requested summary length, in tokens.
pub const MAX_SUMMARY_TOKENS: usize = 512;

/// A validated summarization request.
///
/// Construction is the validation boundary: a `GenerationRequest` that
/// exists always satisfies `1 <= min_length <= max_length <= 512` and
/// carries non-blank text, so nothing deeper in the engine re-checks ad hoc
/// numeric inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    text: String,
    max_length: usize,
    min_length: usize,
}

impl GenerationRequest {
    pub fn new(
        text: impl Into<String>,
        max_length: usize,
        min_length: usize,
    ) -> Result<Self, EngineError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyText.into());
        }
        if min_length == 0 || max_length == 0 {
            return Err(ValidationError::ZeroLength.into());
        }
        if min_length > max_length {
            return Err(ValidationError::MinExceedsMax {
                min: min_length,
                max: max_length,
            }
            .into());
        }
        if max_length > MAX_SUMMARY_TOKENS {
            return Err(ValidationError::MaxTooLarge { max: max_length }.into());
        }

        Ok(Self {
            text,
            max_length,
            min_length,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }
}
