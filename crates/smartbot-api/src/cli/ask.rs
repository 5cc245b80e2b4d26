//! `smartbot ask`: one question, one answer.

use anyhow::Context;
use console::style;

use crate::state::AppState;

/// Answer a single question and print the result.
pub async fn ask(state: &AppState, question: &str, json: bool) -> anyhow::Result<()> {
    let responder = state.load_responder().await?;

    let progress = crate::cli::spinner("thinking...", state.quiet || json);
    let answer = responder.generate(question).await;
    progress.finish_and_clear();
    let answer = answer.context("failed to generate an answer")?;

    if json {
        let output = serde_json::json!({
            "question": question,
            "answer": answer,
            "model": responder.model_name(),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{} {}", style("Chatbot:").cyan().bold(), answer);
    }

    Ok(())
}
