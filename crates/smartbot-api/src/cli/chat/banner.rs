//! Welcome banner display for chat sessions.

use std::io::{self, Write};

use console::style;

/// Print the welcome banner at the start of a chat session.
///
/// Shows the title, the exit hint, and which models answer the questions.
pub fn print_welcome_banner(
    out: &mut impl Write,
    embedding_model: &str,
    generation_model: &str,
) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}", style("SMART AI CHATBOT").cyan().bold())?;
    writeln!(out, "  {}", style("Ask anything about products!").dim())?;
    writeln!(out, "  {}", style("Type 'exit' to quit.").dim())?;
    writeln!(out)?;
    writeln!(
        out,
        "  {}  {}",
        style("Embeddings:").bold(),
        style(embedding_model).dim()
    )?;
    writeln!(
        out,
        "  {}  {}",
        style("Generation:").bold(),
        style(generation_model).dim()
    )?;
    writeln!(out, "  {}", style("Type /help for commands").dim())?;
    writeln!(out, "  {}", style("---").dim())?;
    writeln!(out)?;
    Ok(())
}
