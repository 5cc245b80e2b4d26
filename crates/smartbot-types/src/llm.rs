//! Decoding settings for sequence-to-sequence generation.

use serde::{Deserialize, Serialize};

/// Beam-search decoding parameters passed to a generator on every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Number of beams tracked in parallel.
    #[serde(default = "default_num_beams")]
    pub num_beams: usize,

    /// Cap on newly generated tokens (the decoder start token is not counted).
    #[serde(default = "default_max_new_tokens")]
    pub max_new_tokens: usize,

    /// Stop as soon as `num_beams` finished hypotheses exist.
    #[serde(default = "default_early_stopping")]
    pub early_stopping: bool,

    /// Prompts longer than this many tokens are truncated.
    #[serde(default = "default_max_input_tokens")]
    pub max_input_tokens: usize,
}

fn default_num_beams() -> usize {
    5
}

fn default_max_new_tokens() -> usize {
    80
}

fn default_early_stopping() -> bool {
    true
}

fn default_max_input_tokens() -> usize {
    512
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            num_beams: default_num_beams(),
            max_new_tokens: default_max_new_tokens(),
            early_stopping: default_early_stopping(),
            max_input_tokens: default_max_input_tokens(),
        }
    }
}
