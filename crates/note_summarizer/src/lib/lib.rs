mod catalog;
mod export;
mod registry;
mod service;
mod stats;
pub mod tracing;

pub use catalog::get_example_notes;
pub use export::export_document;
pub use registry::ModelRegistry;
pub use service::{SummaryOutcome, SummaryService};
pub use stats::{get_statistics, StatisticsSnapshot};
pub use summary_engine::{
    DeviceKind, DevicePolicy, EngineError, GenerationRequest, ModelInfo, ModelName, Summarizer,
    T5Summarizer, ValidationError,
};
