//! Generator trait definition.
//!
//! The core abstraction that text-to-text generation backends implement.
//! Uses RPITIT for `generate`, matching the `Embedder` port.

use smartbot_types::error::ModelError;
use smartbot_types::llm::GenerationConfig;

/// Trait for sequence-to-sequence generation backends (T5, etc.).
///
/// Implementations live in smartbot-infra (e.g., `T5Generator`). Each call
/// must use its own decoding scratch state so a shared generator stays safe
/// to call from several tasks.
pub trait Generator: Send + Sync {
    /// Generate an answer for `prompt` and return it decoded, with special
    /// tokens stripped.
    fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> impl std::future::Future<Output = Result<String, ModelError>> + Send;

    /// Identifier of the underlying model (e.g., "t5-small").
    fn model_name(&self) -> &str;
}
