//! Local sentence-embedding models.
//!
//! Provides the fastembed-based implementation of the `Embedder` port.

pub mod embedder;
