//! Data directory layout for Smartbot.
//!
//! Everything the chatbot keeps on disk lives under one data directory:
//! `config.toml` and the downloaded model cache.

use std::path::{Path, PathBuf};

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `SMARTBOT_DATA_DIR` environment variable
/// 2. Home directory fallback: `~/.smartbot`
/// 3. `./.smartbot` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("SMARTBOT_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".smartbot");
    }

    PathBuf::from(".smartbot")
}

/// Default model cache: `{data_dir}/models`.
pub fn model_cache_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("models")
}
