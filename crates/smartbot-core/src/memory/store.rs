//! Embedding memory: a fixed knowledge base searchable by meaning.
//!
//! `EmbeddingMemory` embeds every knowledge sentence once at construction
//! and keeps the unit-normalized matrix for the process lifetime. Queries
//! are embedded with the same embedder and compared by dot product, which
//! equals cosine similarity because both sides have unit norm.

use smartbot_types::error::ModelError;
use smartbot_types::memory::RetrievedFact;
use tracing::{debug, info};

use super::box_embedder::BoxEmbedder;
use super::vector::{dot, l2_normalize, rank_top_k};

/// Read-only knowledge base with precomputed unit-norm embeddings.
///
/// Row `i` of the embedding matrix belongs to knowledge sentence `i`; the
/// index is the sentence's identity for retrieval.
pub struct EmbeddingMemory {
    embedder: BoxEmbedder,
    knowledge: Vec<String>,
    embeddings: Vec<Vec<f32>>,
}

impl EmbeddingMemory {
    /// Embed `knowledge` with `embedder` and build the memory.
    ///
    /// # Errors
    ///
    /// - [`ModelError::EmptyKnowledge`] if `knowledge` is empty.
    /// - [`ModelError::Inference`] if embedding fails, returns the wrong
    ///   number of vectors, or returns vectors whose length differs from
    ///   the embedder's declared dimension.
    pub async fn new(embedder: BoxEmbedder, knowledge: Vec<String>) -> Result<Self, ModelError> {
        if knowledge.is_empty() {
            return Err(ModelError::EmptyKnowledge);
        }

        info!(
            model = %embedder.model_name(),
            facts = knowledge.len(),
            "Embedding knowledge base"
        );

        let raw = embedder.embed(&knowledge).await?;
        if raw.len() != knowledge.len() {
            return Err(ModelError::inference(format!(
                "embedder returned {} vectors for {} facts",
                raw.len(),
                knowledge.len()
            )));
        }

        let embeddings = raw
            .into_iter()
            .map(l2_normalize)
            .collect::<Result<Vec<_>, _>>()?;

        let dimension = embedder.dimension();
        if let Some(bad) = embeddings.iter().position(|e| e.len() != dimension) {
            return Err(ModelError::inference(format!(
                "fact {bad} has dimension {}, but {} declares {dimension}",
                embeddings[bad].len(),
                embedder.model_name()
            )));
        }

        info!(dimension, "Knowledge base ready");

        Ok(Self {
            embedder,
            knowledge,
            embeddings,
        })
    }

    /// The knowledge sentences in index order.
    pub fn knowledge(&self) -> &[String] {
        &self.knowledge
    }

    /// The unit-norm embedding matrix, one row per knowledge sentence.
    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    /// Number of knowledge sentences.
    pub fn len(&self) -> usize {
        self.knowledge.len()
    }

    /// Always false: construction rejects an empty knowledge base.
    pub fn is_empty(&self) -> bool {
        self.knowledge.is_empty()
    }

    /// Column count of the embedding matrix.
    pub fn dimension(&self) -> usize {
        self.embeddings[0].len()
    }

    /// Name of the embedding model backing this memory.
    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }

    /// Return the `top_k` most similar knowledge sentences, best first.
    pub async fn retrieve(&self, query: &str, top_k: usize) -> Result<Vec<String>, ModelError> {
        let facts = self.retrieve_scored(query, top_k).await?;
        Ok(facts.into_iter().map(|f| f.text).collect())
    }

    /// Return the `top_k` most similar knowledge entries with their scores.
    ///
    /// `top_k` is clamped to the knowledge size; `0` yields an empty list.
    /// Scores are non-increasing; equal scores are ordered by ascending index.
    #[tracing::instrument(name = "retrieve", skip(self, query))]
    pub async fn retrieve_scored(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<RetrievedFact>, ModelError> {
        let query_embedding = l2_normalize(self.embedder.embed_one(query).await?)?;
        if query_embedding.len() != self.dimension() {
            return Err(ModelError::inference(format!(
                "query embedding has dimension {}, expected {}",
                query_embedding.len(),
                self.dimension()
            )));
        }

        let scores: Vec<f32> = self
            .embeddings
            .iter()
            .map(|row| dot(row, &query_embedding))
            .collect();
        debug!(?scores, "Similarity scores");

        Ok(rank_top_k(&scores, top_k)
            .into_iter()
            .map(|index| RetrievedFact {
                index,
                text: self.knowledge[index].clone(),
                score: scores[index],
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FixedEmbedder, TrigramEmbedder};
    use smartbot_types::knowledge::{DEFAULT_KNOWLEDGE, default_knowledge};

    async fn product_memory() -> EmbeddingMemory {
        EmbeddingMemory::new(BoxEmbedder::new(TrigramEmbedder), default_knowledge())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_stored_embeddings_have_unit_norm() {
        let memory = product_memory().await;
        assert_eq!(memory.embeddings().len(), DEFAULT_KNOWLEDGE.len());
        for row in memory.embeddings() {
            let norm = dot(row, row).sqrt();
            assert!((norm - 1.0).abs() < 1e-5, "norm was {norm}");
        }
    }

    #[tokio::test]
    async fn test_earbud_battery_question_retrieves_earbud_fact() {
        let memory = product_memory().await;
        let result = memory
            .retrieve("How long does the earbud battery last?", 1)
            .await
            .unwrap();
        assert_eq!(
            result,
            vec!["Our earbuds have 40ms low-latency mode and 8 hours battery backup.".to_string()]
        );
    }

    #[tokio::test]
    async fn test_each_fact_retrieves_itself_first() {
        let memory = product_memory().await;
        for fact in DEFAULT_KNOWLEDGE {
            let result = memory.retrieve(fact, 1).await.unwrap();
            assert_eq!(result, vec![fact.to_string()]);
        }
    }

    #[tokio::test]
    async fn test_retrieve_is_deterministic() {
        let memory = product_memory().await;
        let first = memory.retrieve_scored("Is the speaker waterproof?", 5).await.unwrap();
        let second = memory.retrieve_scored("Is the speaker waterproof?", 5).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_scores_are_non_increasing() {
        let memory = product_memory().await;
        let facts = memory
            .retrieve_scored("Do headphones have noise cancellation?", 5)
            .await
            .unwrap();
        assert_eq!(facts.len(), 5);
        assert!(facts.windows(2).all(|w| w[0].score >= w[1].score));
        assert_eq!(facts[0].index, 1);
    }

    #[tokio::test]
    async fn test_top_k_clamped_to_corpus_size() {
        let memory = product_memory().await;
        let result = memory.retrieve("warranty", 50).await.unwrap();
        assert_eq!(result.len(), DEFAULT_KNOWLEDGE.len());
        let result = memory.retrieve("warranty", 2).await.unwrap();
        assert_eq!(result.len(), 2);
        assert!(memory.retrieve("warranty", 0).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_ties_resolved_by_lowest_index() {
        let knowledge = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let memory = EmbeddingMemory::new(BoxEmbedder::new(FixedEmbedder::new(vec![1.0, 1.0])), knowledge)
            .await
            .unwrap();
        let result = memory.retrieve("anything", 3).await.unwrap();
        assert_eq!(result, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_vectors_must_match_declared_dimension() {
        let embedder = FixedEmbedder::new(vec![1.0, 0.0, 0.0]).declaring(384);
        let result = EmbeddingMemory::new(BoxEmbedder::new(embedder), default_knowledge()).await;
        assert!(matches!(result, Err(ModelError::Inference(_))));
    }

    #[tokio::test]
    async fn test_empty_knowledge_rejected() {
        let result = EmbeddingMemory::new(BoxEmbedder::new(TrigramEmbedder), Vec::new()).await;
        assert!(matches!(result, Err(ModelError::EmptyKnowledge)));
    }

    #[tokio::test]
    async fn test_degenerate_query_embedding_is_inference_error() {
        let memory = product_memory().await;
        // Punctuation-only text has no trigrams, so its vector is all zeros.
        let err = memory.retrieve("?!", 1).await.unwrap_err();
        assert!(matches!(err, ModelError::Inference(_)));
    }

    #[tokio::test]
    async fn test_memory_accessors() {
        let memory = product_memory().await;
        assert_eq!(memory.len(), 5);
        assert!(!memory.is_empty());
        assert_eq!(memory.dimension(), crate::testing::TRIGRAM_DIM);
        assert_eq!(memory.model_name(), "trigram-test");
        assert_eq!(memory.knowledge()[4], DEFAULT_KNOWLEDGE[4]);
    }
}
