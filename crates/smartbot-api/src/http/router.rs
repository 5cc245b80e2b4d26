//! Axum router configuration with middleware.
//!
//! Middleware: CORS (any origin), request tracing, and a 10 KiB body limit.

use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use smartbot_core::chat::responder::ResponseGenerator;

use crate::http::handlers;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 10 * 1024;

/// Build the chat router around a loaded responder.
pub fn build_router(responder: Arc<ResponseGenerator>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(handlers::chat::chat))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(responder)
}
