//! Unified error handling for `llm-service`.
//!
//! This module exposes a single top-level error type [`LlmError`] for the
//! whole crate and groups domain-specific errors in nested enums. Small
//! helpers for reading/validating environment variables return the unified
//! [`Result<T>`] alias.

use reqwest::StatusCode;
use thiserror::Error;

/// Unified result alias for the entire crate.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Top-level error for the `llm-service` crate.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum LlmError {
    /// Configuration/validation errors (startup).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Errors attributed to the upstream provider.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Underlying HTTP transport error (e.g., `reqwest::Error`).
    #[error("[LLM Service] transport error: {0}")]
    HttpTransport(#[from] reqwest::Error),
}

impl LlmError {
    /// Whether a failure is transient and worth retrying on the generation
    /// path: transport-level failures, rate limits, and upstream 5xx.
    pub fn is_retryable(&self) -> bool {
        match self {
            LlmError::HttpTransport(e) => !e.is_builder(),
            LlmError::Provider(p) => matches!(
                &p.kind,
                ProviderErrorKind::HttpStatus(h)
                    if h.status.is_server_error() || h.status == StatusCode::TOO_MANY_REQUESTS
            ),
            LlmError::Config(_) => false,
        }
    }
}

/// Error enum for environment/config-driven setup.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A number failed to parse (limits, timeouts, retry knobs).
    #[error("[LLM Service] invalid number in {var}: {reason}")]
    InvalidNumber {
        var: &'static str,
        reason: &'static str,
    },

    /// A numeric field was outside of the allowed range.
    #[error("[LLM Service] {field} is out of range: {detail}")]
    OutOfRange {
        field: &'static str,
        detail: &'static str,
    },
}

/// Error attributed to the upstream LLM provider.
#[derive(Debug, Error)]
#[error("[LLM Service] {kind}")]
pub struct ProviderError {
    pub kind: ProviderErrorKind,
}

impl ProviderError {
    pub fn new(kind: ProviderErrorKind) -> Self {
        Self { kind }
    }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ProviderErrorKind {
    /// The endpoint is empty or does not start with http/https.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Upstream returned a non-successful HTTP status.
    #[error("HTTP {} from {}: {}", .0.status, .0.url, .0.snippet)]
    HttpStatus(HttpError),

    /// Response payload could not be decoded as expected.
    #[error("decode error: {0}")]
    Decode(String),

    /// The completion response carried no choices.
    #[error("empty `choices` in chat completion response")]
    EmptyChoices,
}

/// Details of a non-success HTTP response.
#[derive(Debug)]
pub struct HttpError {
    pub status: StatusCode,
    pub url: String,
    pub snippet: String,
}

/// Trims a response body down to a short, log-friendly snippet.
pub fn make_snippet(body: &str) -> String {
    const MAX: usize = 240;
    let trimmed = body.trim();
    if trimmed.len() <= MAX {
        return trimmed.to_string();
    }
    let mut end = MAX;
    while !trimmed.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}…", &trimmed[..end])
}

/// Parses an optional `u32` from env (`Ok(None)` if unset/empty).
pub fn env_opt_u32(name: &'static str) -> Result<Option<u32>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u32>().map(Some).map_err(|_| {
            LlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u32",
            })
        }),
        _ => Ok(None),
    }
}

/// Parses an optional `u64` from env (`Ok(None)` if unset/empty).
pub fn env_opt_u64(name: &'static str) -> Result<Option<u64>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<u64>().map(Some).map_err(|_| {
            LlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected u64",
            })
        }),
        _ => Ok(None),
    }
}

/// Parses an optional `f32` from env (`Ok(None)` if unset/empty).
pub fn env_opt_f32(name: &'static str) -> Result<Option<f32>> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => v.parse::<f32>().map(Some).map_err(|_| {
            LlmError::from(ConfigError::InvalidNumber {
                var: name,
                reason: "expected f32",
            })
        }),
        _ => Ok(None),
    }
}

/// Validates that a floating-point value lies within an inclusive range.
pub fn validate_range(
    field: &'static str,
    value: f32,
    min: f32,
    max: f32,
    detail: &'static str,
) -> Result<()> {
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, detail }.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rate_limit_and_server_errors_are_retryable() {
        for status in [StatusCode::TOO_MANY_REQUESTS, StatusCode::BAD_GATEWAY] {
            let err = LlmError::from(ProviderError::new(ProviderErrorKind::HttpStatus(
                HttpError {
                    status,
                    url: "http://x/v1/chat/completions".into(),
                    snippet: String::new(),
                },
            )));
            assert!(err.is_retryable(), "{status} should be retryable");
        }
    }

    #[test]
    fn client_errors_and_decode_failures_are_not_retryable() {
        let unauthorized = LlmError::from(ProviderError::new(ProviderErrorKind::HttpStatus(
            HttpError {
                status: StatusCode::UNAUTHORIZED,
                url: "http://x".into(),
                snippet: String::new(),
            },
        )));
        assert!(!unauthorized.is_retryable());

        let decode =
            LlmError::from(ProviderError::new(ProviderErrorKind::Decode("bad json".into())));
        assert!(!decode.is_retryable());
    }

    #[test]
    fn make_snippet_keeps_short_bodies_and_truncates_long_ones() {
        assert_eq!(make_snippet("  ok  "), "ok");

        let long = "ব".repeat(400);
        let snip = make_snippet(&long);
        assert!(snip.ends_with('…'));
        assert!(snip.len() < long.len());
    }
}
