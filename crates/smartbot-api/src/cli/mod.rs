//! CLI command definitions for the `smartbot` binary.
//!
//! Running `smartbot` with no subcommand starts the interactive chat loop.

pub mod ask;
pub mod chat;
pub mod retrieve;

use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use indicatif::{ProgressBar, ProgressStyle};
use smartbot_types::config::ChatbotConfig;

/// Answer product questions from a small knowledge base.
#[derive(Parser)]
#[command(name = "smartbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for info, -vv for debug, -vvv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Export tracing spans through OpenTelemetry. Spans are printed to
    /// stdout, so leave this off when piping output.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(flatten)]
    pub models: ModelArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Default log filter when `RUST_LOG` is not set.
    pub fn log_directive(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive chat session (the default).
    Chat,

    /// Answer a single question and exit.
    Ask {
        /// The question to answer.
        question: String,
    },

    /// Show the knowledge facts closest to a query, with similarity scores.
    Retrieve {
        /// Text to search the knowledge base for.
        query: String,

        /// Number of facts to return (defaults to `top_k` from config.toml).
        #[arg(long)]
        top_k: Option<usize>,
    },

    /// Serve the chat endpoint (`POST /api/chat`) over HTTP.
    Serve {
        /// Port to listen on.
        #[arg(short, long, env = "PORT", default_value_t = 5000)]
        port: u16,

        /// Host to bind to.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

/// Model selection flags that override `config.toml`.
#[derive(Args, Debug, Default)]
pub struct ModelArgs {
    /// Sentence embedding model identifier.
    #[arg(long, global = true, env = "SMARTBOT_EMBEDDING_MODEL")]
    pub embedding_model: Option<String>,

    /// Seq2seq generation model repository on the Hugging Face hub.
    #[arg(long, global = true, env = "SMARTBOT_GENERATION_MODEL")]
    pub generation_model: Option<String>,

    /// Number of beams used while decoding.
    #[arg(long, global = true)]
    pub num_beams: Option<usize>,

    /// Maximum number of tokens to generate per answer.
    #[arg(long, global = true)]
    pub max_new_tokens: Option<usize>,
}

impl ModelArgs {
    /// Apply every flag that was given on top of the loaded configuration.
    pub fn apply(&self, config: &mut ChatbotConfig) {
        if let Some(model) = &self.embedding_model {
            config.embedding.model = model.clone();
        }
        if let Some(model) = &self.generation_model {
            config.generation.model = model.clone();
        }
        if let Some(num_beams) = self.num_beams {
            config.generation.decoding.num_beams = num_beams;
        }
        if let Some(max_new_tokens) = self.max_new_tokens {
            config.generation.decoding.max_new_tokens = max_new_tokens;
        }
    }
}

/// Create a spinner on stderr, hidden when `quiet` is set.
pub fn spinner(message: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
