//! Line input handling for the chat loop.
//!
//! Interactive terminals get `rustyline_async::Readline` (line editing,
//! history, Ctrl+C / Ctrl+D handling); piped stdin is read line by line from
//! any async buffered reader. Lines are returned as typed, minus the line
//! terminator.

use rustyline_async::{Readline, ReadlineError, ReadlineEvent, SharedWriter};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};
use tracing::warn;

/// Events produced by the input handler.
#[derive(Debug, PartialEq)]
pub enum InputEvent {
    /// User submitted a line.
    Message(String),
    /// End of input (Ctrl+D or a closed pipe).
    Eof,
    /// Interrupt signal (Ctrl+C).
    Interrupted,
}

/// Where the chat loop reads its lines from.
pub trait LineSource {
    /// Whether the source renders its own prompt; otherwise the loop prints it.
    fn draws_prompt(&self) -> bool;

    fn read_line(&mut self) -> impl Future<Output = InputEvent>;

    /// Flush any pending output before the session ends.
    fn finish(&mut self) {}
}

/// Async readline input for interactive terminals.
pub struct TerminalInput {
    rl: Readline,
}

impl TerminalInput {
    /// Create the input handler with the given prompt.
    ///
    /// Returns the handler and a `SharedWriter` that prints above the prompt
    /// without clobbering the line being edited.
    pub fn new(prompt: String) -> Result<(Self, SharedWriter), ReadlineError> {
        let (rl, stdout) = Readline::new(prompt)?;
        Ok((Self { rl }, stdout))
    }
}

impl LineSource for TerminalInput {
    fn draws_prompt(&self) -> bool {
        true
    }

    async fn read_line(&mut self) -> InputEvent {
        match self.rl.readline().await {
            Ok(ReadlineEvent::Line(line)) => {
                let _ = self.rl.add_history_entry(line.clone());
                InputEvent::Message(line)
            }
            Ok(ReadlineEvent::Eof) => InputEvent::Eof,
            Ok(ReadlineEvent::Interrupted) => InputEvent::Interrupted,
            Err(e) => {
                warn!(error = %e, "Failed to read input, ending session");
                InputEvent::Eof
            }
        }
    }

    fn finish(&mut self) {
        let _ = self.rl.flush();
    }
}

/// Line reader over any async buffered reader (piped stdin, tests).
pub struct ReaderInput<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> ReaderInput<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

impl<R: AsyncBufRead + Unpin> LineSource for ReaderInput<R> {
    fn draws_prompt(&self) -> bool {
        false
    }

    /// A read error ends the session like EOF does.
    async fn read_line(&mut self) -> InputEvent {
        match self.lines.next_line().await {
            Ok(Some(line)) => InputEvent::Message(line),
            Ok(None) => InputEvent::Eof,
            Err(e) => {
                warn!(error = %e, "Failed to read input, ending session");
                InputEvent::Eof
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lines_keep_their_whitespace() {
        let mut input = ReaderInput::new("  hello \r\n\nbye".as_bytes());
        assert!(!input.draws_prompt());
        assert_eq!(input.read_line().await, InputEvent::Message("  hello ".to_string()));
        assert_eq!(input.read_line().await, InputEvent::Message(String::new()));
        assert_eq!(input.read_line().await, InputEvent::Message("bye".to_string()));
        assert_eq!(input.read_line().await, InputEvent::Eof);
    }
}
