//! Main chat loop orchestration.
//!
//! Prints the banner, then reads one line per turn: commands are handled in
//! place, anything else is answered by the [`ResponseGenerator`]. A failed
//! turn is reported and the loop keeps going; only fatal model errors end it
//! early. Questions reach the model exactly as typed; trimming only applies
//! to command detection.

use std::io::Write;

use anyhow::Context;
use console::style;
use tracing::{info, warn};

use smartbot_core::chat::responder::ResponseGenerator;

use super::banner::print_welcome_banner;
use super::commands::{self, ChatCommand};
use super::input::{InputEvent, LineSource};

pub const PROMPT: &str = "You: ";
const FAREWELL: &str = "Chatbot: Goodbye!";

/// Run the interactive chat loop until `exit`, `/exit`, or end of input.
pub async fn run_chat_loop<I, W>(
    responder: &ResponseGenerator,
    input: &mut I,
    out: &mut W,
    quiet: bool,
) -> anyhow::Result<()>
where
    I: LineSource,
    W: Write,
{
    print_welcome_banner(
        out,
        responder.memory().model_name(),
        responder.model_name(),
    )?;

    let mut turns = 0usize;
    info!(facts = responder.memory().len(), "Chat session started");

    loop {
        if !input.draws_prompt() {
            write!(out, "{PROMPT}")?;
            out.flush()?;
        }

        let text = match input.read_line().await {
            InputEvent::Eof => {
                writeln!(out)?;
                writeln!(out, "{FAREWELL}")?;
                break;
            }
            InputEvent::Interrupted => {
                writeln!(out, "{}", style("Press Ctrl+D to exit, or keep chatting.").dim())?;
                continue;
            }
            InputEvent::Message(text) => text,
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(cmd) = commands::parse(trimmed) {
            match cmd {
                ChatCommand::Exit => {
                    writeln!(out, "{FAREWELL}")?;
                    break;
                }
                ChatCommand::Help => commands::print_help(out)?,
                ChatCommand::Facts => commands::print_facts(out, responder.memory().knowledge())?,
                ChatCommand::Unknown(cmd_name) => {
                    writeln!(
                        out,
                        "  {} Unknown command: {}. Type /help for available commands.",
                        style("?").yellow().bold(),
                        style(cmd_name).dim()
                    )?;
                }
            }
            continue;
        }

        let progress = crate::cli::spinner("thinking...", quiet);
        let result = responder.generate(&text).await;
        progress.finish_and_clear();

        match result {
            Ok(answer) => {
                turns += 1;
                writeln!(out, "Chatbot: {answer}")?;
            }
            Err(e) if !e.is_fatal() => {
                warn!(error = %e, "Chat turn failed");
                eprintln!("Chatbot error: {e}");
            }
            Err(e) => {
                input.finish();
                return Err(e).context("chat session aborted");
            }
        }
    }

    input.finish();
    info!(turns, "Chat session ended");
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::chat::input::ReaderInput;
    use crate::testing::{Reply, ScriptedInput, responder};

    use super::*;

    async fn run(responder: &ResponseGenerator, input: &str) -> (anyhow::Result<()>, String) {
        let mut out = Vec::new();
        let mut input = ReaderInput::new(input.as_bytes());
        let result = run_chat_loop(responder, &mut input, &mut out, true).await;
        (result, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_exit_in_any_case_skips_generation() {
        let (responder, prompts) = responder(Reply::Text("unused")).await;

        let (result, out) = run(&responder, "  EXIT  \nWhat about speakers?\n").await;

        assert!(result.is_ok());
        assert!(out.contains("SMART AI CHATBOT"));
        assert!(out.contains("Chatbot: Goodbye!"));
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_answers_each_question() {
        let (responder, prompts) = responder(Reply::Text("It lasts 8 hours.")).await;

        let (result, out) = run(&responder, "What is the battery backup?\nexit\n").await;

        assert!(result.is_ok());
        assert!(out.contains("You: Chatbot: It lasts 8 hours.\n"));
        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].starts_with("Context: "));
        assert!(prompts[0].contains("\nQuestion: What is the battery backup?\n"));
    }

    #[tokio::test]
    async fn test_question_reaches_the_model_untrimmed() {
        let (responder, prompts) = responder(Reply::Text("It lasts 8 hours.")).await;

        let (result, _) = run(&responder, "  What is the battery backup?  \nexit\n").await;

        assert!(result.is_ok());
        let prompts = prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("\nQuestion:   What is the battery backup?  \n"));
    }

    #[tokio::test]
    async fn test_end_of_input_says_goodbye() {
        let (responder, prompts) = responder(Reply::Text("unused")).await;

        let (result, out) = run(&responder, "").await;

        assert!(result.is_ok());
        assert!(out.ends_with("Chatbot: Goodbye!\n"));
        assert!(prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_interrupt_prints_hint_and_keeps_chatting() {
        console::set_colors_enabled(false);
        let (responder, prompts) = responder(Reply::Text("Up to 12 hours.")).await;
        let mut input = ScriptedInput::new(vec![
            InputEvent::Interrupted,
            InputEvent::Message("How long does the battery last?".to_string()),
            InputEvent::Message("exit".to_string()),
        ]);
        let mut out = Vec::new();

        let result = run_chat_loop(&responder, &mut input, &mut out, true).await;

        assert!(result.is_ok());
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Press Ctrl+D to exit, or keep chatting."));
        assert!(out.contains("Chatbot: Up to 12 hours.\n"));
        assert!(out.ends_with("Chatbot: Goodbye!\n"));
        assert!(!out.contains(PROMPT));
        assert_eq!(prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_inference_error_keeps_the_loop_running() {
        let (responder, prompts) = responder(Reply::Inference).await;

        let (result, out) = run(&responder, "first question\nsecond question\nexit\n").await;

        assert!(result.is_ok());
        assert_eq!(prompts.lock().unwrap().len(), 2);
        assert!(!out.contains("Chatbot: decoder"));
        assert!(out.contains("Chatbot: Goodbye!"));
    }

    #[tokio::test]
    async fn test_fatal_error_ends_the_session() {
        let (responder, prompts) = responder(Reply::Load).await;

        let (result, out) = run(&responder, "first question\nsecond question\n").await;

        assert!(result.is_err());
        assert_eq!(prompts.lock().unwrap().len(), 1);
        assert!(!out.contains("Goodbye"));
    }

    #[tokio::test]
    async fn test_commands_and_blank_lines_skip_generation() {
        let (responder, prompts) = responder(Reply::Text("unused")).await;

        let (result, out) = run(&responder, "\n   \n/facts\n/help\n/bogus\n/quit\n").await;

        assert!(result.is_ok());
        assert!(out.contains("Smartwatches track heart rate"));
        assert!(out.contains("Available commands:"));
        assert!(out.contains("Unknown command:"));
        assert!(out.contains("/bogus"));
        assert!(out.contains("Chatbot: Goodbye!"));
        assert!(prompts.lock().unwrap().is_empty());
    }
}
