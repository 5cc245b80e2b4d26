//! Retrieval-grounded answering.
//!
//! `prompt` assembles the context/question/instruction prompt;
//! `responder::ResponseGenerator` ties retrieval and generation together;
//! `intent` tags questions with a keyword-based shopper intent.

pub mod intent;
pub mod prompt;
pub mod responder;
