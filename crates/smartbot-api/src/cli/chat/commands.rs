//! Command parsing for the chat loop.
//!
//! The bare word `exit` (any case) ends the session; everything else that
//! counts as a command starts with `/`.

use std::io::{self, Write};

use console::style;

/// Available commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// List the knowledge facts answers are grounded in.
    Facts,
    /// Exit the chat session.
    Exit,
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a command.
///
/// Returns `None` if the input is a question for the chatbot.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if trimmed.eq_ignore_ascii_case("exit") {
        return Some(ChatCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return None;
    }

    let cmd = trimmed
        .split_whitespace()
        .next()
        .unwrap_or(trimmed)
        .to_lowercase();

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/facts" | "/knowledge" => Some(ChatCommand::Facts),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// Print the help text listing all available commands.
pub fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "  {}", style("Available commands:").bold())?;
    writeln!(out)?;
    writeln!(out, "  {}   {}", style("/help").cyan(), "Show this help message")?;
    writeln!(out, "  {}  {}", style("/facts").cyan(), "List the product facts I know")?;
    writeln!(out, "  {}   {}", style("/exit").cyan(), "End the chat session")?;
    writeln!(out)?;
    writeln!(
        out,
        "  {}",
        style("Typing 'exit' or pressing Ctrl+D also ends the session").dim()
    )?;
    writeln!(out)?;
    Ok(())
}

/// Print the knowledge corpus, numbered by retrieval index.
pub fn print_facts(out: &mut impl Write, knowledge: &[String]) -> io::Result<()> {
    writeln!(out)?;
    for (index, fact) in knowledge.iter().enumerate() {
        writeln!(out, "  {} {}", style(format!("{index}.")).dim(), fact)?;
    }
    writeln!(out)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_exit_word() {
        assert_eq!(parse("exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("EXIT"), Some(ChatCommand::Exit));
        assert_eq!(parse("  Exit  "), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_parse_exit_commands() {
        assert_eq!(parse("/exit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/quit"), Some(ChatCommand::Exit));
        assert_eq!(parse("/q"), Some(ChatCommand::Exit));
    }

    #[test]
    fn test_exit_inside_a_question_is_not_a_command() {
        assert_eq!(parse("how do I exit the pairing mode?"), None);
        assert_eq!(parse("exit now"), None);
    }

    #[test]
    fn test_parse_help_and_facts() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/?"), Some(ChatCommand::Help));
        assert_eq!(parse("/facts"), Some(ChatCommand::Facts));
        assert_eq!(parse("/FACTS"), Some(ChatCommand::Facts));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("What is the battery backup of earbuds?"), None);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse("/foo bar"),
            Some(ChatCommand::Unknown("/foo".to_string()))
        );
    }

    #[test]
    fn test_print_facts_numbers_from_zero() {
        let mut out = Vec::new();
        print_facts(&mut out, &["first".to_string(), "second".to_string()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("first"));
        assert!(text.contains("second"));
        assert!(text.find("first") < text.find("second"));
    }
}
