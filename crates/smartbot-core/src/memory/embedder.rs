//! Embedder trait for text-to-vector conversion.
//!
//! Defines the interface for embedding text into vectors for semantic search.
//! Implementations (e.g., fastembed local models) live in smartbot-infra.

use smartbot_types::error::ModelError;

/// Trait for converting text into embedding vectors.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in smartbot-infra.
pub trait Embedder: Send + Sync {
    /// Embed one or more texts into pooled sentence vectors.
    ///
    /// Returns one vector per input text, in input order. Vectors need not
    /// be normalized; callers that compare by cosine normalize them.
    fn embed(
        &self,
        texts: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<Vec<f32>>, ModelError>> + Send;

    /// The model name used for embeddings (e.g., "sentence-transformers/all-MiniLM-L6-v2").
    fn model_name(&self) -> &str;

    /// The dimensionality of the output vectors.
    fn dimension(&self) -> usize;
}
