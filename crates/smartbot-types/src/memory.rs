//! Retrieval result types.

use serde::{Deserialize, Serialize};

/// A knowledge entry returned by similarity search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedFact {
    /// Position of the fact in the knowledge base.
    pub index: usize,
    pub text: String,
    /// Cosine similarity between the query and the fact, in [-1, 1].
    pub score: f32,
}
