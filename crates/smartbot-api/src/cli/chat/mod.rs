//! Interactive CLI chat experience.
//!
//! Reads one line per turn, answers it through the retrieval-augmented
//! responder, and handles a few slash commands. Entry point:
//! `loop_runner::run_chat_loop`.

pub mod banner;
pub mod commands;
pub mod input;
pub mod loop_runner;
