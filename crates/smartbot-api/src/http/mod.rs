//! HTTP surface: a single JSON chat endpoint served by `smartbot serve`.

pub mod error;
pub mod handlers;
pub mod router;
