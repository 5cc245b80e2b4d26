//! Shared domain types for Smartbot.
//!
//! This crate contains the types used across the Smartbot workspace:
//! model errors, configuration sections, generation settings, retrieval
//! results, and the built-in product knowledge.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod config;
pub mod error;
pub mod knowledge;
pub mod llm;
pub mod memory;
