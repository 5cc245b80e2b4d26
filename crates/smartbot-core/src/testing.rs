//! Deterministic in-process models for unit tests.

use std::sync::Mutex;

use smartbot_types::error::ModelError;
use smartbot_types::llm::GenerationConfig;

use crate::llm::generator::Generator;
use crate::memory::embedder::Embedder;

pub const TRIGRAM_DIM: usize = 1024;

/// Hashes character trigrams of each lowercase word into a count vector.
///
/// Shared word fragments ("earbud" / "earbuds") raise cosine similarity,
/// which is enough signal to rank the product facts.
pub struct TrigramEmbedder;

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for b in bytes {
        hash ^= u64::from(*b);
        hash = hash.wrapping_mul(0x0000_0100_0000_01b3);
    }
    hash
}

pub fn trigram_vector(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0; TRIGRAM_DIM];
    let lower = text.to_lowercase();
    for word in lower.split(|c: char| !c.is_ascii_alphanumeric()).filter(|w| !w.is_empty()) {
        let padded: Vec<char> = format!("#{word}#").chars().collect();
        for window in padded.windows(3) {
            let gram: String = window.iter().collect();
            vector[(fnv1a(gram.as_bytes()) % TRIGRAM_DIM as u64) as usize] += 1.0;
        }
    }
    vector
}

impl Embedder for TrigramEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        Ok(texts.iter().map(|t| trigram_vector(t)).collect())
    }

    fn model_name(&self) -> &str {
        "trigram-test"
    }

    fn dimension(&self) -> usize {
        TRIGRAM_DIM
    }
}

/// Returns the same vector for every input.
pub struct FixedEmbedder {
    vector: Vec<f32>,
    declared: usize,
}

impl FixedEmbedder {
    pub fn new(vector: Vec<f32>) -> Self {
        let declared = vector.len();
        Self { vector, declared }
    }

    /// Report `dimension` from `Embedder::dimension` regardless of the vector.
    pub fn declaring(mut self, dimension: usize) -> Self {
        self.declared = dimension;
        self
    }
}

impl Embedder for FixedEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        Ok(texts.iter().map(|_| self.vector.clone()).collect())
    }

    fn model_name(&self) -> &str {
        "fixed-test"
    }

    fn dimension(&self) -> usize {
        self.declared
    }
}

/// Records every prompt and config it receives and answers with a canned reply.
pub struct RecordingGenerator {
    reply: Result<String, String>,
    pub calls: Mutex<Vec<(String, GenerationConfig)>>,
}

impl RecordingGenerator {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Ok(reply.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: Err(reason.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl Generator for RecordingGenerator {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String, ModelError> {
        self.calls
            .lock()
            .unwrap()
            .push((prompt.to_string(), config.clone()));
        self.reply.clone().map_err(ModelError::Inference)
    }

    fn model_name(&self) -> &str {
        "recording-test"
    }
}

impl Generator for std::sync::Arc<RecordingGenerator> {
    async fn generate(&self, prompt: &str, config: &GenerationConfig) -> Result<String, ModelError> {
        self.as_ref().generate(prompt, config).await
    }

    fn model_name(&self) -> &str {
        self.as_ref().model_name()
    }
}
