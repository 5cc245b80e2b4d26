//! `POST /api/chat`: answer one message.
//!
//! Request: `{"message": "..."}`. Response: `{"reply": "...", "intent": "..."}`.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use smartbot_core::chat::intent::{Intent, detect_intent};
use smartbot_core::chat::responder::ResponseGenerator;

use crate::http::error::ChatError;

/// Longest accepted message, counted in UTF-16 code units like a browser
/// counts `string.length`.
pub const MAX_MESSAGE_LEN: usize = 500;

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    pub intent: Intent,
}

/// Answer a chat message.
///
/// The body is taken as raw JSON so that a wrong `message` type produces the
/// same 400 as a missing one instead of axum's default 422.
pub async fn chat(
    State(responder): State<Arc<ResponseGenerator>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatReply>, ChatError> {
    let Json(body) = payload.map_err(|rejection| {
        debug!(reason = %rejection.body_text(), "Rejected chat body");
        ChatError::InvalidMessage
    })?;
    let message = validate_message(&body)?;

    let intent = detect_intent(message);
    let reply = responder.generate(message).await?;

    Ok(Json(ChatReply { reply, intent }))
}

fn validate_message(body: &Value) -> Result<&str, ChatError> {
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .ok_or(ChatError::InvalidMessage)?;

    if message.encode_utf16().count() > MAX_MESSAGE_LEN {
        return Err(ChatError::MessageTooLong);
    }
    Ok(message)
}
