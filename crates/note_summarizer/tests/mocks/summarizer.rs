use std::sync::{Arc, Mutex};

use note_summarizer::{
    DeviceKind, EngineError, GenerationRequest, ModelInfo, ModelName, Summarizer,
};

#[derive(Clone, Debug)]
pub struct MockSummarizer {
    pub summary: String,
    pub calls: Arc<Mutex<Vec<String>>>,
    pub fail_with: Option<String>,
}

impl MockSummarizer {
    pub fn new(summary: &str) -> Self {
        Self {
            summary: summary.to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: None,
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            summary: String::new(),
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_with: Some(msg.to_string()),
        }
    }
}

impl Summarizer for MockSummarizer {
    fn summarize(&self, request: &GenerationRequest) -> Result<String, EngineError> {
        self.calls.lock().unwrap().push(request.text().to_string());
        if let Some(ref msg) = self.fail_with {
            return Err(EngineError::Generation {
                message: msg.clone(),
            });
        }
        Ok(self.summary.clone())
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            model_name: ModelName::Small,
            device: DeviceKind::Cpu,
        }
    }
}
