//! FastEmbed-based local embedding generator.
//!
//! Implements the `Embedder` trait from `smartbot-core` using fastembed's
//! ONNX runtime models. The default all-MiniLM-L6-v2 model produces
//! 384-dimensional vectors by mean pooling the attention-masked token states.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use smartbot_core::memory::embedder::Embedder;
use smartbot_observe::genai_attrs::{OP_EMBEDDINGS, PROVIDER_FASTEMBED};
use smartbot_types::config::EmbeddingSettings;
use smartbot_types::error::ModelError;
use tracing::info;

/// Map a configured model identifier onto a fastembed model and its dimension.
///
/// Accepts the Hugging Face repository name with or without its organisation.
pub fn resolve_model(name: &str) -> Option<(EmbeddingModel, usize)> {
    let short = name.rsplit('/').next().unwrap_or(name).to_lowercase();
    match short.as_str() {
        "all-minilm-l6-v2" => Some((EmbeddingModel::AllMiniLML6V2, 384)),
        "all-minilm-l12-v2" => Some((EmbeddingModel::AllMiniLML12V2, 384)),
        "bge-small-en-v1.5" => Some((EmbeddingModel::BGESmallENV15, 384)),
        _ => None,
    }
}

/// Sentence embedder backed by a fastembed `TextEmbedding` session.
///
/// The ONNX session needs exclusive access while running, so it sits behind
/// a mutex; inference runs on the blocking thread pool.
pub struct FastEmbedder {
    model: Arc<Mutex<TextEmbedding>>,
    model_name: String,
    dimension: usize,
}

impl FastEmbedder {
    /// Load (downloading on first use) the configured embedding model.
    ///
    /// # Errors
    ///
    /// [`ModelError::Load`] if the identifier is unsupported or the model
    /// files cannot be fetched or initialised.
    pub async fn load(settings: &EmbeddingSettings, cache_dir: PathBuf) -> Result<Self, ModelError> {
        let model_name = settings.model.clone();
        let (model, dimension) = resolve_model(&model_name)
            .ok_or_else(|| ModelError::load(&model_name, "unsupported embedding model"))?;

        info!(model = %model_name, cache_dir = %cache_dir.display(), "Loading sentence embedding model");

        let options = TextInitOptions::new(model)
            .with_cache_dir(cache_dir)
            .with_max_length(settings.max_length)
            .with_show_download_progress(true);

        let name = model_name.clone();
        let embedding = tokio::task::spawn_blocking(move || TextEmbedding::try_new(options))
            .await
            .map_err(|e| ModelError::load(&name, e))?
            .map_err(|e| ModelError::load(&name, e))?;

        Ok(Self {
            model: Arc::new(Mutex::new(embedding)),
            model_name,
            dimension,
        })
    }
}

impl Embedder for FastEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        let span = tracing::debug_span!(
            "embed",
            gen_ai.operation.name = OP_EMBEDDINGS,
            gen_ai.provider.name = PROVIDER_FASTEMBED,
            gen_ai.request.model = %self.model_name,
            batch = texts.len(),
        );
        let model = Arc::clone(&self.model);
        let texts = texts.to_vec();

        tokio::task::spawn_blocking(move || {
            let _entered = span.enter();
            let mut model = model
                .lock()
                .map_err(|_| ModelError::inference("embedding model lock poisoned"))?;
            model.embed(texts, None).map_err(ModelError::inference)
        })
        .await
        .map_err(ModelError::inference)?
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_model_full_and_short_names() {
        assert!(matches!(
            resolve_model("sentence-transformers/all-MiniLM-L6-v2"),
            Some((EmbeddingModel::AllMiniLML6V2, 384))
        ));
        assert!(matches!(
            resolve_model("all-MiniLM-L6-v2"),
            Some((EmbeddingModel::AllMiniLML6V2, 384))
        ));
        assert!(matches!(
            resolve_model("BAAI/bge-small-en-v1.5"),
            Some((EmbeddingModel::BGESmallENV15, 384))
        ));
    }

    #[test]
    fn test_resolve_model_rejects_unknown() {
        assert!(resolve_model("openai/text-embedding-3-small").is_none());
    }

    #[tokio::test]
    async fn test_load_unknown_model_is_load_error() {
        let settings = EmbeddingSettings {
            model: "nobody/unknown-model".to_string(),
            ..EmbeddingSettings::default()
        };
        let result = FastEmbedder::load(&settings, std::env::temp_dir()).await;
        assert!(matches!(result, Err(ModelError::Load { .. })));
    }

    /// Downloads all-MiniLM-L6-v2 on first run; `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore = "downloads the embedding model"]
    async fn test_minilm_retrieves_the_earbuds_fact() {
        use smartbot_core::memory::box_embedder::BoxEmbedder;
        use smartbot_core::memory::store::EmbeddingMemory;
        use smartbot_types::knowledge::{DEFAULT_KNOWLEDGE, default_knowledge};

        let cache = tempfile::tempdir().unwrap();
        let embedder = FastEmbedder::load(&EmbeddingSettings::default(), cache.path().to_path_buf())
            .await
            .unwrap();
        let memory = EmbeddingMemory::new(BoxEmbedder::new(embedder), default_knowledge())
            .await
            .unwrap();

        assert_eq!(memory.dimension(), 384);
        for row in memory.embeddings() {
            let norm = row.iter().map(|x| x * x).sum::<f32>().sqrt();
            assert!((norm - 1.0).abs() < 1e-4, "norm {norm}");
        }

        let facts = memory
            .retrieve("How long does the earbud battery last?", 1)
            .await
            .unwrap();
        assert_eq!(facts, vec![DEFAULT_KNOWLEDGE[0].to_string()]);
    }
}
