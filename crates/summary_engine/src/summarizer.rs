use std::{fmt, str::FromStr, sync::Arc};

use serde::Serialize;

use crate::{DeviceKind, EngineError, GenerationRequest};

/// The seam between the engine and whatever issues generation requests.
///
/// Implementations must be safe to share across threads; the concrete T5
/// backend serializes generation internally so overlapping calls against
/// one handle cannot corrupt model state.
pub trait Summarizer {
    /// Generate an abstractive summary for a validated request.
    fn summarize(&self, request: &GenerationRequest) -> Result<String, EngineError>;

    /// Metadata about the loaded model. Pure read, no failure modes.
    fn info(&self) -> ModelInfo;
}

impl<S: Summarizer + ?Sized> Summarizer for Arc<S> {
    fn summarize(&self, request: &GenerationRequest) -> Result<String, EngineError> {
        (**self).summarize(request)
    }

    fn info(&self) -> ModelInfo {
        (**self).info()
    }
}

/// The fixed set of supported summarization models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ModelName {
    /// `t5-base`, the default variant.
    #[default]
    #[serde(rename = "t5-base")]
    Base,
    /// `t5-small`, lighter weights for constrained machines.
    #[serde(rename = "t5-small")]
    Small,
}

impl ModelName {
    pub const ALL: [ModelName; 2] = [ModelName::Base, ModelName::Small];

    pub fn as_str(&self) -> &'static str {
        match self {
            ModelName::Base => "t5-base",
            ModelName::Small => "t5-small",
        }
    }

    /// Hugging Face hub repository holding the weights.
    pub fn hub_repo(&self) -> &'static str {
        self.as_str()
    }
}

impl fmt::Display for ModelName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelName {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "t5-base" => Ok(ModelName::Base),
            "t5-small" => Ok(ModelName::Small),
            other => Err(EngineError::ModelLoad {
                message: format!(
                    "unknown model name `{other}`, supported: t5-base, t5-small"
                ),
            }),
        }
    }
}

/// Handle metadata surfaced to the caller for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModelInfo {
    pub model_name: ModelName,
    pub device: DeviceKind,
}
