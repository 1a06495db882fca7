use std::{
    sync::Mutex,
    time::{Duration, Instant},
};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::{
    generation::LogitsProcessor,
    models::t5,
    utils::apply_repeat_penalty,
};
use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::Tokenizer;

use crate::{
    DeviceKind, DevicePolicy, EngineError, GenerationRequest, ModelInfo, ModelName, Summarizer,
};

/// Maximum encoded input capacity. T5 was trained with 512-position inputs;
/// anything longer is bounded before encoding (see [`bound_input`]).
pub const MAX_INPUT_TOKENS: usize = 512;

/// Fixed seed so argmax decoding stays reproducible run to run.
const GENERATION_SEED: u64 = 299_792_458;

/// Mild penalty discouraging verbatim token loops, applied over a sliding
/// window of recent output.
const REPEAT_PENALTY: f32 = 1.1;
const REPEAT_LAST_N: usize = 64;

const DEFAULT_GENERATION_BUDGET: Duration = Duration::from_secs(120);

/// A loaded T5 model plus its tokenizer.
///
/// Loading is expensive (weights are memory-mapped and moved to the chosen
/// device), so one handle per model name is created and reused for the
/// process lifetime. Generation mutates the decoder KV cache, so calls are
/// serialized through an internal mutex; the handle itself is `Sync` and
/// can be shared freely.
pub struct T5Summarizer {
    name: ModelName,
    device: Device,
    device_kind: DeviceKind,
    tokenizer: Tokenizer,
    model: Mutex<t5::T5ForConditionalGeneration>,
    eos_token_id: u32,
    decoder_start_token_id: u32,
    use_cache: bool,
    generation_budget: Duration,
}

impl T5Summarizer {
    /// Load a model by name with the default device policy (prefer an
    /// available CUDA accelerator, fall back to CPU).
    pub fn load(name: ModelName) -> Result<Self, EngineError> {
        Self::load_with_policy(name, DevicePolicy::default())
    }

    /// Load a model by name on the device the given policy selects.
    ///
    /// Weights, tokenizer, and config are resolved through the Hugging Face
    /// hub cache; the first use of a model requires network access, after
    /// which the on-disk cache is used.
    #[tracing::instrument(skip_all, fields(model = %name))]
    pub fn load_with_policy(name: ModelName, policy: DevicePolicy) -> Result<Self, EngineError> {
        let started = Instant::now();
        let (device, device_kind) = policy.select();
        tracing::info!(device = %device_kind, "Loading summarization model");

        let api = Api::new().map_err(|e| EngineError::load(name, e))?;
        let repo = api.repo(Repo::new(name.hub_repo().to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| EngineError::load(name, e))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| EngineError::load(name, e))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| EngineError::load(name, e))?;

        let config_raw =
            std::fs::read_to_string(&config_path).map_err(|e| EngineError::load(name, e))?;
        let config: t5::Config =
            serde_json::from_str(&config_raw).map_err(|e| EngineError::load(name, e))?;

        let tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| EngineError::load(name, e))?;

        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[&weights_path], DType::F32, &device)
                .map_err(|e| EngineError::load(name, e))?
        };
        let model = t5::T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| EngineError::load(name, e))?;

        let eos_token_id = config.eos_token_id as u32;
        let decoder_start_token_id =
            config.decoder_start_token_id.unwrap_or(config.pad_token_id) as u32;

        tracing::info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            device = %device_kind,
            "Model ready"
        );

        Ok(Self {
            name,
            device,
            device_kind,
            tokenizer,
            use_cache: config.use_cache,
            model: Mutex::new(model),
            eos_token_id,
            decoder_start_token_id,
            generation_budget: DEFAULT_GENERATION_BUDGET,
        })
    }

    /// Override the wall-clock budget a single generation may consume.
    pub fn with_generation_budget(mut self, budget: Duration) -> Self {
        self.generation_budget = budget;
        self
    }
}

impl Summarizer for T5Summarizer {
    #[tracing::instrument(skip_all, fields(model = %self.name, max = request.max_length(), min = request.min_length()))]
    fn summarize(&self, request: &GenerationRequest) -> Result<String, EngineError> {
        let started = Instant::now();

        // T5 is a multi-task model; the task is selected by prefix.
        let prompt = format!("summarize: {}", request.text().trim());
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(EngineError::generation)?;
        let mut input_ids: Vec<u32> = encoding.get_ids().to_vec();

        // Clinical notes routinely exceed the model's input capacity.
        // Bounding here is lossy but deterministic; availability wins over
        // completeness, and it is never reported as a failure.
        if bound_input(&mut input_ids, MAX_INPUT_TOKENS, self.eos_token_id) {
            tracing::warn!(
                capacity = MAX_INPUT_TOKENS,
                "Input exceeds model capacity, truncating (lossy)"
            );
        }

        let mut model = self
            .model
            .lock()
            .map_err(|_| EngineError::generation("model lock poisoned by a previous failure"))?;
        model.clear_kv_cache();

        let input = Tensor::new(input_ids.as_slice(), &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(EngineError::generation)?;
        let encoder_output = model.encode(&input).map_err(EngineError::generation)?;

        // Greedy argmax decoding with a fixed seed keeps identical inputs
        // producing stable summaries.
        let mut logits_processor = LogitsProcessor::new(GENERATION_SEED, None, None);
        let mut output_ids = vec![self.decoder_start_token_id];
        let deadline = started + self.generation_budget;

        while output_ids.len() - 1 < request.max_length() {
            if Instant::now() > deadline {
                return Err(EngineError::Generation {
                    message: format!(
                        "generation exceeded its {}s budget",
                        self.generation_budget.as_secs()
                    ),
                });
            }

            let decoder_input = if output_ids.len() == 1 || !self.use_cache {
                Tensor::new(output_ids.as_slice(), &self.device)
            } else {
                let last = *output_ids.last().unwrap_or(&self.decoder_start_token_id);
                Tensor::new(&[last], &self.device)
            }
            .and_then(|t| t.unsqueeze(0))
            .map_err(EngineError::generation)?;

            let logits = model
                .decode(&decoder_input, &encoder_output)
                .and_then(|t| t.squeeze(0))
                .map_err(EngineError::generation)?;

            let window_start = output_ids.len().saturating_sub(REPEAT_LAST_N);
            let logits =
                apply_repeat_penalty(&logits, REPEAT_PENALTY, &output_ids[window_start..])
                    .map_err(EngineError::generation)?;

            // Hold the end-of-sequence token back until the minimum length
            // is satisfied.
            let generated = output_ids.len() - 1;
            let logits = if generated < request.min_length() {
                suppress_token(&logits, self.eos_token_id).map_err(EngineError::generation)?
            } else {
                logits
            };

            let next = logits_processor
                .sample(&logits)
                .map_err(EngineError::generation)?;
            if next == self.eos_token_id {
                break;
            }
            output_ids.push(next);
        }

        let generated = &output_ids[1..];
        if generated.is_empty() {
            return Err(EngineError::Generation {
                message: "model produced no output tokens".into(),
            });
        }

        let text = self
            .tokenizer
            .decode(generated, true)
            .map_err(EngineError::generation)?;

        tracing::info!(
            tokens = generated.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Summary generated"
        );

        Ok(normalize_whitespace(&text))
    }

    fn info(&self) -> ModelInfo {
        ModelInfo {
            model_name: self.name,
            device: self.device_kind,
        }
    }
}

/// Bound encoded input to `capacity` tokens, keeping the leading tokens and
/// re-terminating with `eos`. Returns whether truncation happened.
fn bound_input(ids: &mut Vec<u32>, capacity: usize, eos: u32) -> bool {
    if ids.len() <= capacity {
        return false;
    }
    ids.truncate(capacity - 1);
    ids.push(eos);
    true
}

/// Collapse runs of whitespace (including newlines the decoder may emit)
/// into single spaces.
fn normalize_whitespace(text: &str) -> String {
    itertools::intersperse(text.split_whitespace(), " ").collect()
}

fn suppress_token(logits: &Tensor, token_id: u32) -> candle_core::Result<Tensor> {
    let mut values = logits.to_vec1::<f32>()?;
    if let Some(value) = values.get_mut(token_id as usize) {
        *value = f32::NEG_INFINITY;
    }
    Tensor::new(values.as_slice(), logits.device())
}
