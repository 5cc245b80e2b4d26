//! Configuration loader for Smartbot.
//!
//! Reads `config.toml` from the data directory (`~/.smartbot/` in production)
//! and deserializes it into [`ChatbotConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::{Path, PathBuf};

use smartbot_types::config::ChatbotConfig;
use smartbot_types::error::CatalogError;
use smartbot_types::knowledge::{Product, catalog_knowledge};

use crate::filesystem::model_cache_dir;

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`ChatbotConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
/// - Otherwise returns the parsed config.
pub async fn load_config(data_dir: &Path) -> ChatbotConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return ChatbotConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return ChatbotConfig::default();
        }
    };

    match toml::from_str::<ChatbotConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            ChatbotConfig::default()
        }
    }
}

/// Resolve where model files are cached.
///
/// An explicit `[embedding] cache_dir` wins; otherwise `{data_dir}/models`.
pub fn resolve_cache_dir(config: &ChatbotConfig, data_dir: &Path) -> PathBuf {
    config
        .embedding
        .cache_dir
        .clone()
        .unwrap_or_else(|| model_cache_dir(data_dir))
}

/// Resolve the knowledge corpus: the rendered product catalog when one is
/// configured, the literal `facts` list otherwise.
///
/// # Errors
///
/// Returns [`CatalogError`] if the configured catalog cannot be read, is
/// not a JSON array of products, or is empty.
pub async fn load_knowledge(config: &ChatbotConfig, data_dir: &Path) -> Result<Vec<String>, CatalogError> {
    let Some(catalog) = &config.knowledge.catalog else {
        return Ok(config.knowledge.facts.clone());
    };

    let path = data_dir.join(catalog);
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| CatalogError::Read {
            path: path.clone(),
            reason: e.to_string(),
        })?;
    let products: Vec<Product> = serde_json::from_str(&content).map_err(|e| CatalogError::Parse {
        path: path.clone(),
        reason: e.to_string(),
    })?;
    if products.is_empty() {
        return Err(CatalogError::Empty { path });
    }

    tracing::info!(products = products.len(), catalog = %path.display(), "Loaded product catalog");
    Ok(catalog_knowledge(&products))
}
