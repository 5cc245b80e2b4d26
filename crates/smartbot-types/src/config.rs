//! Configuration types for Smartbot.
//!
//! `ChatbotConfig` represents the top-level `config.toml`: which models to
//! load, how generation decodes, how many facts retrieval returns, and the
//! knowledge corpus itself.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::knowledge::default_knowledge;
use crate::llm::GenerationConfig;

/// Top-level configuration for the chatbot.
///
/// Loaded from `~/.smartbot/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatbotConfig {
    /// Default number of facts returned by the `retrieve` command.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    #[serde(default)]
    pub knowledge: KnowledgeSettings,

    #[serde(default)]
    pub embedding: EmbeddingSettings,

    #[serde(default)]
    pub generation: GenerationSettings,
}

fn default_top_k() -> usize {
    1
}

impl Default for ChatbotConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            knowledge: KnowledgeSettings::default(),
            embedding: EmbeddingSettings::default(),
            generation: GenerationSettings::default(),
        }
    }
}

/// Where the knowledge corpus comes from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KnowledgeSettings {
    /// Reference sentences embedded once at startup.
    #[serde(default = "default_knowledge")]
    pub facts: Vec<String>,

    /// Product catalog (JSON array of products). When set, its rendered
    /// sentences replace `facts`. Relative paths resolve against the data
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

impl Default for KnowledgeSettings {
    fn default() -> Self {
        Self {
            facts: default_knowledge(),
            catalog: None,
        }
    }
}

/// Sentence-embedding model selection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingSettings {
    /// Model identifier (e.g., "sentence-transformers/all-MiniLM-L6-v2").
    #[serde(default = "default_embedding_model")]
    pub model: String,

    /// Where downloaded model files are cached. Defaults to `{data_dir}/models`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// Token limit applied by the embedding tokenizer.
    #[serde(default = "default_embedding_max_length")]
    pub max_length: usize,
}

fn default_embedding_model() -> String {
    "sentence-transformers/all-MiniLM-L6-v2".to_string()
}

fn default_embedding_max_length() -> usize {
    256
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            model: default_embedding_model(),
            cache_dir: None,
            max_length: default_embedding_max_length(),
        }
    }
}

/// Generation model selection plus its decoding parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationSettings {
    /// Hugging Face repository of the seq2seq model.
    #[serde(default = "default_generation_model")]
    pub model: String,

    /// Repository revision holding `model.safetensors` and `tokenizer.json`.
    #[serde(default = "default_generation_revision")]
    pub revision: String,

    #[serde(flatten)]
    pub decoding: GenerationConfig,
}

fn default_generation_model() -> String {
    "t5-small".to_string()
}

fn default_generation_revision() -> String {
    "refs/pr/15".to_string()
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            model: default_generation_model(),
            revision: default_generation_revision(),
            decoding: GenerationConfig::default(),
        }
    }
}
