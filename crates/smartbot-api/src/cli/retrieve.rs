//! `smartbot retrieve`: inspect retrieval without loading a generation model.

use std::fmt::Write as _;

use anyhow::Context;
use console::style;
use smartbot_types::memory::RetrievedFact;

use crate::state::AppState;

/// Print the facts most similar to `query`, best first.
pub async fn retrieve(
    state: &AppState,
    query: &str,
    top_k: Option<usize>,
    json: bool,
) -> anyhow::Result<()> {
    let memory = state.load_memory().await?;
    let top_k = top_k.unwrap_or(state.config.top_k);

    let facts = memory
        .retrieve_scored(query, top_k)
        .await
        .context("retrieval failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&facts)?);
    } else if facts.is_empty() {
        println!("  {}", style("No facts requested.").dim());
    } else {
        print!("{}", render_facts(&facts));
    }

    Ok(())
}

/// One line per fact: rank, score, corpus index, text.
fn render_facts(facts: &[RetrievedFact]) -> String {
    let mut out = String::new();
    for (rank, fact) in facts.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} {} {}",
            rank + 1,
            style(format!("[{:.4}]", fact.score)).green(),
            style(format!("#{}", fact.index)).dim(),
            fact.text
        );
    }
    out
}
