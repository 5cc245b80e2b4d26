//! Business logic and model trait definitions for Smartbot.
//!
//! This crate defines the "ports" (embedder and generator traits) that the
//! infrastructure layer implements, plus the retrieval memory and the
//! response generator built on top of them. It depends only on
//! `smartbot-types` -- never on `smartbot-infra` or any model runtime.

pub mod chat;
pub mod llm;
pub mod memory;

#[cfg(test)]
pub(crate) mod testing;
