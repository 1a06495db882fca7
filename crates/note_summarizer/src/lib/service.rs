use serde::Serialize;
use summary_engine::{EngineError, GenerationRequest, ModelInfo, Summarizer};

use crate::stats::{get_statistics, StatisticsSnapshot};

/// A generated summary together with its before/after statistics.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryOutcome {
    pub summary: String,
    pub stats: StatisticsSnapshot,
}

/// The boundary the front-end talks to.
///
/// Validates raw user input into a [`GenerationRequest`] exactly once,
/// delegates to the engine seam, and derives statistics from the result.
/// Generic over [`Summarizer`] so the engine can be mocked in tests.
pub struct SummaryService<S> {
    summarizer: S,
}

impl<S: Summarizer> SummaryService<S> {
    pub fn new(summarizer: S) -> Self {
        Self { summarizer }
    }

    pub fn model_info(&self) -> ModelInfo {
        self.summarizer.info()
    }

    /// Summarize a note under the given token-length bounds.
    ///
    /// Invalid input (blank note, inverted or out-of-range bounds) is
    /// rejected here before any generation is attempted; engine failures
    /// propagate unchanged so the caller can render a distinct message
    /// while keeping the user's input intact.
    #[tracing::instrument(skip(self, text), fields(chars = text.chars().count()))]
    pub fn summarize_note(
        &self,
        text: &str,
        max_length: usize,
        min_length: usize,
    ) -> Result<SummaryOutcome, EngineError> {
        let request = GenerationRequest::new(text, max_length, min_length)?;
        let summary = self.summarizer.summarize(&request)?;
        let stats = get_statistics(text, &summary);

        tracing::info!(
            original_chars = stats.original_length,
            summary_chars = stats.summary_length,
            reduction = format!("{:.1}%", stats.reduction_percentage),
            "Note summarized"
        );

        Ok(SummaryOutcome { summary, stats })
    }
}
