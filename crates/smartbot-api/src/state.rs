//! Application state: data directory, resolved configuration, and model
//! loading.
//!
//! Models are loaded lazily per command so that `retrieve` never pays for
//! the generation model.

use std::path::PathBuf;

use anyhow::Context;
use smartbot_core::chat::responder::ResponseGenerator;
use smartbot_core::memory::box_embedder::BoxEmbedder;
use smartbot_core::memory::store::EmbeddingMemory;
use smartbot_infra::config::{load_config, load_knowledge, resolve_cache_dir};
use smartbot_infra::filesystem::resolve_data_dir;
use smartbot_infra::llm::create_generator;
use smartbot_infra::vector::embedder::FastEmbedder;
use smartbot_types::config::ChatbotConfig;

use crate::cli::{ModelArgs, spinner};

/// Shared application state for every command.
pub struct AppState {
    pub data_dir: PathBuf,
    pub config: ChatbotConfig,
    /// Knowledge facts, from the configured product catalog or inline list.
    pub knowledge: Vec<String>,
    pub quiet: bool,
}

impl AppState {
    /// Resolve the data directory, load `config.toml` with CLI overrides, and
    /// read the knowledge facts.
    pub async fn init(models: &ModelArgs, quiet: bool) -> anyhow::Result<Self> {
        let data_dir = resolve_data_dir();
        tokio::fs::create_dir_all(&data_dir)
            .await
            .with_context(|| format!("failed to create data directory {}", data_dir.display()))?;

        let mut config = load_config(&data_dir).await;
        models.apply(&mut config);

        let knowledge = load_knowledge(&config, &data_dir)
            .await
            .context("could not load the knowledge base")?;

        Ok(Self {
            data_dir,
            config,
            knowledge,
            quiet,
        })
    }

    fn cache_dir(&self) -> PathBuf {
        resolve_cache_dir(&self.config, &self.data_dir)
    }

    /// Load the embedding model and embed the knowledge corpus.
    pub async fn load_memory(&self) -> anyhow::Result<EmbeddingMemory> {
        let progress = spinner("Loading embedding model...", self.quiet);
        let embedder = FastEmbedder::load(&self.config.embedding, self.cache_dir()).await;
        progress.finish_and_clear();
        let embedder = embedder.context("could not start the embedding model")?;

        let memory = EmbeddingMemory::new(BoxEmbedder::new(embedder), self.knowledge.clone())
            .await
            .context("could not embed the knowledge base")?;
        Ok(memory)
    }

    /// Load both models and wire them into a [`ResponseGenerator`].
    pub async fn load_responder(&self) -> anyhow::Result<ResponseGenerator> {
        let memory = self.load_memory().await?;

        let progress = spinner("Loading generation model...", self.quiet);
        let generator = create_generator(&self.config.generation, self.cache_dir()).await;
        progress.finish_and_clear();
        let generator = generator.context("could not start the generation model")?;

        Ok(ResponseGenerator::new(
            generator,
            memory,
            self.config.generation.decoding.clone(),
        ))
    }
}
