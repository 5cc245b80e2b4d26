//! OpenTelemetry GenAI Semantic Convention attribute values.
//!
//! Spans set `gen_ai.operation.name`, `gen_ai.provider.name` and
//! `gen_ai.request.model` inline (the `tracing` macros need literal field
//! names); the values they record come from here so every span agrees.

// --- Operation name values ---

/// Seq2seq text generation.
pub const OP_GENERATE: &str = "generate";

/// Text embedding for retrieval.
pub const OP_EMBEDDINGS: &str = "embeddings";

// --- Provider name values ---

/// Local candle runtime.
pub const PROVIDER_CANDLE: &str = "candle";

/// Local fastembed (ONNX) runtime.
pub const PROVIDER_FASTEMBED: &str = "fastembed";
