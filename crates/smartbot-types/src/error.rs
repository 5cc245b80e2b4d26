use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by embedding and generation models.
///
/// `Load` is fatal at startup. `Inference` aborts a single retrieval or
/// generation call and is surfaced to its caller unchanged.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to load model '{model}': {reason}")]
    Load { model: String, reason: String },

    #[error("inference failed: {0}")]
    Inference(String),

    #[error("knowledge base is empty")]
    EmptyKnowledge,
}

impl ModelError {
    /// Shorthand for a [`ModelError::Load`] for `model`.
    pub fn load(model: impl Into<String>, reason: impl ToString) -> Self {
        Self::Load {
            model: model.into(),
            reason: reason.to_string(),
        }
    }

    /// Shorthand for a [`ModelError::Inference`].
    pub fn inference(reason: impl ToString) -> Self {
        Self::Inference(reason.to_string())
    }

    /// Whether this error should abort the process rather than a single turn.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, Self::Inference(_))
    }
}

/// Errors raised while turning a product catalog into knowledge sentences.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read product catalog {}: {reason}", path.display())]
    Read { path: PathBuf, reason: String },

    #[error("invalid product catalog {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("product catalog {} lists no products", path.display())]
    Empty { path: PathBuf },
}
