//! Infrastructure layer for Smartbot.
//!
//! Contains implementations of the model traits defined in `smartbot-core`:
//! fastembed sentence embeddings, a candle T5 generator with beam-search
//! decoding, plus data-directory resolution and `config.toml` loading.

pub mod config;
pub mod filesystem;
pub mod llm;
pub mod vector;
