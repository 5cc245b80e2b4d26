//! Deterministic models and input sources shared by the api tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use smartbot_core::chat::responder::ResponseGenerator;
use smartbot_core::llm::box_generator::BoxGenerator;
use smartbot_core::llm::generator::Generator;
use smartbot_core::memory::box_embedder::BoxEmbedder;
use smartbot_core::memory::embedder::Embedder;
use smartbot_core::memory::store::EmbeddingMemory;
use smartbot_types::error::ModelError;
use smartbot_types::knowledge::default_knowledge;
use smartbot_types::llm::GenerationConfig;

use crate::cli::chat::input::{InputEvent, LineSource};

/// Letter-frequency embedder; the extra constant component keeps every
/// vector non-zero.
pub struct LetterEmbedder;

impl Embedder for LetterEmbedder {
    async fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ModelError> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut v = vec![0.0f32; 27];
                v[26] = 1.0;
                for c in text.to_ascii_lowercase().bytes() {
                    if c.is_ascii_lowercase() {
                        v[(c - b'a') as usize] += 1.0;
                    }
                }
                v
            })
            .collect())
    }

    fn model_name(&self) -> &str {
        "letters"
    }

    fn dimension(&self) -> usize {
        27
    }
}

pub enum Reply {
    Text(&'static str),
    Inference,
    Load,
}

/// Answers every prompt the same way and records the prompts it saw.
pub struct ScriptedGenerator {
    reply: Reply,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl Generator for ScriptedGenerator {
    async fn generate(&self, prompt: &str, _config: &GenerationConfig) -> Result<String, ModelError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Inference => Err(ModelError::inference("decoder exploded")),
            Reply::Load => Err(ModelError::load("t5-small", "weights vanished")),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// A responder over the default product facts, plus the prompt log.
pub async fn responder(reply: Reply) -> (ResponseGenerator, Arc<Mutex<Vec<String>>>) {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let memory = EmbeddingMemory::new(BoxEmbedder::new(LetterEmbedder), default_knowledge())
        .await
        .unwrap();
    let generator = BoxGenerator::new(ScriptedGenerator {
        reply,
        prompts: Arc::clone(&prompts),
    });
    (
        ResponseGenerator::new(generator, memory, GenerationConfig::default()),
        prompts,
    )
}

/// Replays a fixed list of input events, then reports end of input.
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new(events: Vec<InputEvent>) -> Self {
        Self {
            events: events.into(),
        }
    }
}

impl LineSource for ScriptedInput {
    fn draws_prompt(&self) -> bool {
        true
    }

    async fn read_line(&mut self) -> InputEvent {
        self.events.pop_front().unwrap_or(InputEvent::Eof)
    }
}
