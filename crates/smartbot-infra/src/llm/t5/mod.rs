//! T5Generator -- concrete [`Generator`] implementation for T5-family models.
//!
//! Fetches `config.json`, `tokenizer.json` and `model.safetensors` through
//! the Hugging Face hub cache, runs the encoder once per prompt, then drives
//! the decoder with [`beam::BeamSearch`]. The KV cache is disabled because
//! beams are re-ranked every step; the decoder sees full sequences instead.

pub mod beam;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use candle_core::{D, DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::t5;
use hf_hub::api::sync::ApiBuilder;
use hf_hub::{Repo, RepoType};
use smartbot_core::llm::generator::Generator;
use smartbot_observe::genai_attrs::{OP_GENERATE, PROVIDER_CANDLE};
use smartbot_types::config::GenerationSettings;
use smartbot_types::error::ModelError;
use smartbot_types::llm::GenerationConfig;
use tokenizers::{Tokenizer, TruncationParams};
use tracing::{debug, info};

use self::beam::BeamSearch;

/// Loaded model, tokenizer, and special token ids.
struct T5Runtime {
    model: t5::T5ForConditionalGeneration,
    tokenizer: Tokenizer,
    device: Device,
    decoder_start_token_id: u32,
    eos_token_id: u32,
}

impl T5Runtime {
    fn load(model_id: &str, revision: &str, cache_dir: PathBuf) -> Result<Self, ModelError> {
        let load_err = |e: &dyn std::fmt::Display| ModelError::load(model_id, e);

        let api = ApiBuilder::new()
            .with_cache_dir(cache_dir)
            .with_progress(true)
            .build()
            .map_err(|e| load_err(&e))?;
        let repo = api.repo(Repo::with_revision(
            model_id.to_string(),
            RepoType::Model,
            revision.to_string(),
        ));

        let config_path = repo.get("config.json").map_err(|e| load_err(&e))?;
        let tokenizer_path = repo.get("tokenizer.json").map_err(|e| load_err(&e))?;
        let weights_path = repo.get("model.safetensors").map_err(|e| load_err(&e))?;

        let config_json = std::fs::read_to_string(&config_path).map_err(|e| load_err(&e))?;
        let mut config: t5::Config = serde_json::from_str(&config_json).map_err(|e| load_err(&e))?;
        config.use_cache = false;

        let device = Device::Cpu;
        // SAFETY: the weights file is owned by the hub cache and not modified while mapped.
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device) }
            .map_err(|e| load_err(&e))?;
        let model = t5::T5ForConditionalGeneration::load(vb, &config).map_err(|e| load_err(&e))?;
        let tokenizer = Tokenizer::from_file(&tokenizer_path).map_err(|e| load_err(&e))?;

        let decoder_start_token_id = config
            .decoder_start_token_id
            .unwrap_or(config.pad_token_id) as u32;

        Ok(Self {
            model,
            tokenizer,
            device,
            decoder_start_token_id,
            eos_token_id: config.eos_token_id as u32,
        })
    }

    fn generate(&mut self, prompt: &str, config: &GenerationConfig) -> Result<String, ModelError> {
        self.tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_input_tokens,
                ..Default::default()
            }))
            .map_err(ModelError::inference)?;
        let encoding = self
            .tokenizer
            .encode(prompt, true)
            .map_err(ModelError::inference)?;
        let input_ids = encoding.get_ids();
        debug!(input_tokens = input_ids.len(), "Prompt tokenized");

        let input = Tensor::new(input_ids, &self.device)
            .and_then(|t| t.unsqueeze(0))
            .map_err(ModelError::inference)?;
        self.model.clear_kv_cache();
        let encoder_output = self.model.encode(&input).map_err(ModelError::inference)?;

        let search = BeamSearch::new(config, self.decoder_start_token_id, self.eos_token_id);
        let model = &mut self.model;
        let device = &self.device;
        let tokens = search.run(|sequences| {
            decoder_log_probs(model, device, &encoder_output, sequences).map_err(ModelError::inference)
        })?;
        debug!(output_tokens = tokens.len(), "Beam search finished");

        self.tokenizer
            .decode(&tokens, true)
            .map_err(ModelError::inference)
    }
}

/// One decoder step for every live beam: `[beams, vocab]` log-probabilities.
fn decoder_log_probs(
    model: &mut t5::T5ForConditionalGeneration,
    device: &Device,
    encoder_output: &Tensor,
    sequences: &[Vec<u32>],
) -> candle_core::Result<Vec<Vec<f32>>> {
    let beams = sequences.len();
    let seq_len = sequences[0].len();
    let (_, src_len, hidden) = encoder_output.dims3()?;

    let flat: Vec<u32> = sequences.concat();
    let decoder_ids = Tensor::from_vec(flat, (beams, seq_len), device)?;
    let encoder_states = encoder_output
        .broadcast_as((beams, src_len, hidden))?
        .contiguous()?;

    let logits = model.decode(&decoder_ids, &encoder_states)?;
    candle_nn::ops::log_softmax(&logits, D::Minus1)?.to_vec2::<f32>()
}

/// Seq2seq generator backed by a candle T5 model on CPU.
///
/// The runtime sits behind a mutex because encode/decode need `&mut`; each
/// call builds its own beam buffers, so nothing else is shared across calls.
pub struct T5Generator {
    runtime: Arc<Mutex<T5Runtime>>,
    model_id: String,
}

impl T5Generator {
    /// Download (on first use) and load the configured model.
    pub async fn load(settings: &GenerationSettings, cache_dir: PathBuf) -> Result<Self, ModelError> {
        let model_id = settings.model.clone();
        let revision = settings.revision.clone();
        info!(model = %model_id, revision = %revision, "Loading generation model");

        let id = model_id.clone();
        let runtime = tokio::task::spawn_blocking(move || T5Runtime::load(&id, &revision, cache_dir))
            .await
            .map_err(|e| ModelError::load(&model_id, e))??;

        info!(model = %model_id, "Generation model ready");
        Ok(Self {
            runtime: Arc::new(Mutex::new(runtime)),
            model_id,
        })
    }
}

impl Generator for T5Generator {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String, ModelError> {
        let span = tracing::info_span!(
            "generate",
            gen_ai.operation.name = OP_GENERATE,
            gen_ai.provider.name = PROVIDER_CANDLE,
            gen_ai.request.model = %self.model_id,
            gen_ai.request.max_tokens = config.max_new_tokens,
            num_beams = config.num_beams,
        );

        let runtime = Arc::clone(&self.runtime);
        let prompt = prompt.to_string();
        let config = config.clone();

        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            let mut runtime = runtime
                .lock()
                .map_err(|_| ModelError::inference("generation model lock poisoned"))?;
            runtime.generate(&prompt, &config)
        })
        .await
        .map_err(ModelError::inference)?
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }
}

#[cfg(test)]
mod tests {
    use smartbot_core::chat::prompt::build_prompt;
    use smartbot_types::knowledge::DEFAULT_KNOWLEDGE;

    use super::*;

    /// Downloads t5-small on first run; `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore = "downloads the generation model"]
    async fn test_t5_small_answers_an_oversized_prompt() {
        let cache = tempfile::tempdir().unwrap();
        let generator = T5Generator::load(&GenerationSettings::default(), cache.path().to_path_buf())
            .await
            .unwrap();

        let context = DEFAULT_KNOWLEDGE.join(" ").repeat(20);
        let prompt = build_prompt(&context, "How long does the earbud battery last?");
        let config = GenerationConfig {
            num_beams: 2,
            max_new_tokens: 16,
            ..GenerationConfig::default()
        };

        let answer = generator.generate(&prompt, &config).await.unwrap();

        assert!(!answer.trim().is_empty());
        assert!(!answer.contains("</s>"));
        assert!(!answer.contains("<pad>"));
    }
}
