//! Smartbot CLI entry point.
//!
//! Binary name: `smartbot`
//!
//! Parses CLI arguments, sets up tracing, loads configuration and models,
//! then dispatches to the chat loop, a one-shot command, or the HTTP server.

mod cli;
mod http;
mod state;
#[cfg(test)]
mod testing;

use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::anyhow;

use clap::Parser;
use clap_complete::generate;

use cli::chat::input::{ReaderInput, TerminalInput};
use cli::chat::loop_runner::{PROMPT, run_chat_loop};
use cli::{Cli, Commands};
use smartbot_observe::tracing_setup::{init_tracing, shutdown_tracing};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(cli.log_directive(), cli.otel) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    let result = run(cli).await;
    shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need config or models
    if let Some(Commands::Completions { shell }) = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "smartbot", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(&cli.models, cli.quiet).await?;

    match cli.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let responder = state.load_responder().await?;
            if std::io::stdin().is_terminal() {
                let (mut input, mut out) = TerminalInput::new(PROMPT.to_string())
                    .map_err(|e| anyhow!("failed to initialize input: {e}"))?;
                run_chat_loop(&responder, &mut input, &mut out, state.quiet).await?;
            } else {
                let mut input = ReaderInput::new(tokio::io::BufReader::new(tokio::io::stdin()));
                run_chat_loop(&responder, &mut input, &mut std::io::stdout(), state.quiet).await?;
            }
        }

        Commands::Ask { question } => {
            cli::ask::ask(&state, &question, cli.json).await?;
        }

        Commands::Retrieve { query, top_k } => {
            cli::retrieve::retrieve(&state, &query, top_k, cli.json).await?;
        }

        Commands::Serve { port, host } => {
            let responder = Arc::new(state.load_responder().await?);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Smartbot API listening on {}",
                console::style("*").cyan().bold(),
                console::style(format!("http://{addr}/api/chat")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(responder);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
///
/// A handler that cannot be installed never fires; the other one still can.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
