//! Generation model implementations.
//!
//! Contains the concrete implementation of the [`Generator`] trait defined in
//! `smartbot-core` (a candle T5 model with beam-search decoding) and a
//! factory ([`create_generator`]) that builds it from [`GenerationSettings`].
//!
//! [`Generator`]: smartbot_core::llm::generator::Generator

pub mod t5;

use std::path::PathBuf;

use smartbot_core::llm::box_generator::BoxGenerator;
use smartbot_types::config::GenerationSettings;
use smartbot_types::error::ModelError;

use self::t5::T5Generator;

/// Load the configured generation model and box it for dynamic dispatch.
///
/// # Errors
///
/// Returns [`ModelError::Load`] if the model files cannot be fetched or loaded.
pub async fn create_generator(
    settings: &GenerationSettings,
    cache_dir: PathBuf,
) -> Result<BoxGenerator, ModelError> {
    let generator = T5Generator::load(settings, cache_dir).await?;
    Ok(BoxGenerator::new(generator))
}
