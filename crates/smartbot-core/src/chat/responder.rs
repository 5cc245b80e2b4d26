//! Response generator: retrieve one fact, prompt the model, return its answer.

use smartbot_types::error::ModelError;
use smartbot_types::llm::GenerationConfig;
use tracing::debug;

use crate::chat::intent::detect_intent;
use crate::chat::prompt::build_prompt;
use crate::llm::box_generator::BoxGenerator;
use crate::memory::store::EmbeddingMemory;

/// Answers user questions grounded in the single most similar fact.
///
/// Owns its `EmbeddingMemory` and the generation model. No state is carried
/// between calls to [`generate`](Self::generate).
pub struct ResponseGenerator {
    generator: BoxGenerator,
    memory: EmbeddingMemory,
    config: GenerationConfig,
}

impl ResponseGenerator {
    /// Compose a responder from a loaded generator and a built memory.
    pub fn new(generator: BoxGenerator, memory: EmbeddingMemory, config: GenerationConfig) -> Self {
        Self {
            generator,
            memory,
            config,
        }
    }

    /// The knowledge memory used for grounding.
    pub fn memory(&self) -> &EmbeddingMemory {
        &self.memory
    }

    /// The decoding parameters used on every call.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Identifier of the generation model.
    pub fn model_name(&self) -> &str {
        self.generator.model_name()
    }

    /// Answer `user_input`.
    ///
    /// Retrieves the top-1 fact, builds the prompt, and decodes with the
    /// configured beam search. Errors from either model are returned as-is.
    #[tracing::instrument(name = "generate", skip_all, fields(model = %self.generator.model_name()))]
    pub async fn generate(&self, user_input: &str) -> Result<String, ModelError> {
        let context = self
            .memory
            .retrieve(user_input, 1)
            .await?
            .into_iter()
            .next()
            .ok_or(ModelError::EmptyKnowledge)?;
        debug!(context = %context, intent = %detect_intent(user_input), "Retrieved context");

        let prompt = build_prompt(&context, user_input);
        self.generator.generate(&prompt, &self.config).await
    }
}
