//! # Summary Engine
//!
//! This crate owns the generative summarization model and its tokenizer.
//! It turns raw clinical note text plus token-length bounds into a bounded
//! abstractive summary, running T5 locally through candle.
//!
//! Model weights are fetched once through the Hugging Face hub cache and
//! held in memory for the process lifetime; callers are expected to cache
//! the handle per model name rather than reload per request.

mod device;
mod error;
mod request;
mod summarizer;
mod t5;

pub use device::{DeviceKind, DevicePolicy};
pub use error::{EngineError, ValidationError};
pub use request::{GenerationRequest, MAX_SUMMARY_TOKENS};
pub use summarizer::{ModelInfo, ModelName, Summarizer};
pub use t5::{T5Summarizer, MAX_INPUT_TOKENS};
