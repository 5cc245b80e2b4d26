//! BoxGenerator -- object-safe dynamic dispatch wrapper for Generator.
//!
//! Follows the same blanket-impl pattern as BoxEmbedder:
//! 1. Define an object-safe `GeneratorDyn` trait with boxed futures
//! 2. Blanket-impl `GeneratorDyn` for all `T: Generator`
//! 3. `BoxGenerator` wraps `Box<dyn GeneratorDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use smartbot_types::error::ModelError;
use smartbot_types::llm::GenerationConfig;

use super::generator::Generator;

/// Object-safe version of [`Generator`] with boxed futures.
pub trait GeneratorDyn: Send + Sync {
    fn generate_boxed<'a>(
        &'a self,
        prompt: &'a str,
        config: &'a GenerationConfig,
    ) -> Pin<Box<dyn Future<Output = Result<String, ModelError>> + Send + 'a>>;

    fn model_name_dyn(&self) -> &str;
}

/// Blanket implementation: any `Generator` automatically implements `GeneratorDyn`.
impl<T: Generator> GeneratorDyn for T {
    fn generate_boxed<'a>(
        &'a self,
        prompt: &'a str,
        config: &'a GenerationConfig,
    ) -> Pin<Box<dyn Future<Output = Result<String, ModelError>> + Send + 'a>> {
        Box::pin(self.generate(prompt, config))
    }

    fn model_name_dyn(&self) -> &str {
        self.model_name()
    }
}

/// Type-erased generator for runtime model selection.
///
/// Since `Generator` uses RPITIT, it cannot be used as a trait object directly.
/// `BoxGenerator` provides equivalent methods that delegate to the inner
/// `GeneratorDyn` trait object.
pub struct BoxGenerator {
    inner: Box<dyn GeneratorDyn + Send + Sync>,
}

impl BoxGenerator {
    /// Wrap a concrete `Generator` in a type-erased box.
    pub fn new<T: Generator + 'static>(generator: T) -> Self {
        Self {
            inner: Box::new(generator),
        }
    }

    /// Generate an answer for `prompt`.
    pub async fn generate(
        &self,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, ModelError> {
        self.inner.generate_boxed(prompt, config).await
    }

    /// Identifier of the underlying model.
    pub fn model_name(&self) -> &str {
        self.inner.model_name_dyn()
    }
}
