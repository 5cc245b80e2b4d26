//! Prompt assembly for grounded answers.
//!
//! Layout:
//! ```text
//! Context: {retrieved fact}
//! Question: {user input}
//! Answer in simple language:
//! ```

/// Instruction line closing every prompt.
pub const ANSWER_INSTRUCTION: &str = "Answer in simple language:";

/// Build the three-line generation prompt from a retrieved fact and the
/// user's raw question. Neither input is trimmed or escaped.
pub fn build_prompt(context: &str, question: &str) -> String {
    format!("Context: {context}\nQuestion: {question}\n{ANSWER_INSTRUCTION}")
}
