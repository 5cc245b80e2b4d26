//! Chat endpoint errors and their HTTP mapping.
//!
//! Every error body has the same `{"reply": "..."}` shape as a successful
//! answer, so a chat widget can render it without special-casing.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::warn;

use smartbot_types::error::ModelError;

/// Reply used when a model fails mid-request.
const MODEL_FAILURE_REPLY: &str = "Sorry, I couldn't answer that right now.";

#[derive(Debug)]
pub enum ChatError {
    /// Missing, empty, or non-string `message`, or an unparseable body.
    InvalidMessage,
    /// `message` longer than the accepted maximum.
    MessageTooLong,
    /// Retrieval or generation failed.
    Model(ModelError),
}

impl From<ModelError> for ChatError {
    fn from(e: ModelError) -> Self {
        ChatError::Model(e)
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        let (status, reply) = match &self {
            ChatError::InvalidMessage => (StatusCode::BAD_REQUEST, "Invalid message format."),
            ChatError::MessageTooLong => (StatusCode::BAD_REQUEST, "Message too long."),
            ChatError::Model(e) => {
                warn!(error = %e, fatal = e.is_fatal(), "Chat request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, MODEL_FAILURE_REPLY)
            }
        };

        (status, Json(json!({ "reply": reply }))).into_response()
    }
}
