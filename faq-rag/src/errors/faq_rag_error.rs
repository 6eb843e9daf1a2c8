//! Unified error type for the faq-rag crate.

use thiserror::Error;

/// Errors produced by the FAQ retrieval layer.
#[derive(Debug, Error)]
pub enum FaqRagError {
    // ── Configuration / environment ──────────────────────────────────────────
    /// Failed to parse an environment variable into the expected type.
    #[error("failed to parse env variable: {key} = '{value}'")]
    EnvParse { key: String, value: String },

    /// Configuration combination is invalid.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Dataset loading ─────────────────────────────────────────────────────
    /// Underlying I/O error (missing or unreadable dataset file).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Dataset is not valid JSON or an entry lacks a required field.
    /// The whole load aborts; there is no per-entry recovery.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Qdrant client / transport ───────────────────────────────────────────
    /// Transport / client error from Qdrant.
    #[error("qdrant error: {0}")]
    Qdrant(String),

    // ── Embeddings backend ──────────────────────────────────────────────────
    /// Embedding backend failed to initialize or to embed inputs.
    #[error("embedding error: {0}")]
    Embedding(String),
}
