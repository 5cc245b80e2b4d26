//! Semantic memory over a fixed knowledge base.
//!
//! The `Embedder` trait turns text into vectors; `EmbeddingMemory` embeds
//! the knowledge corpus once and answers nearest-neighbour queries against
//! it by cosine similarity.

pub mod box_embedder;
pub mod embedder;
pub mod store;
pub mod vector;
