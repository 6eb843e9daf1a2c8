//! Public application error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use faq_rag::errors::faq_rag_error::FaqRagError;
use llm_service::LlmError;
use serde::Serialize;
use thiserror::Error;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error("invalid configuration: {0}")]
    BadConfig(&'static str),

    // --- IO / network / server ---
    #[error("failed to bind listener")]
    Bind(#[source] std::io::Error),

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Downstream ---
    /// Embedding computation or index query failure. Single attempt,
    /// propagated as-is: the similarity computation is deterministic and a
    /// retry would not change the outcome.
    #[error(transparent)]
    Retrieval(#[from] FaqRagError),

    /// Language-model failure, surfaced after the bounded retry budget.
    #[error(transparent)]
    Generation(#[from] LlmError),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            // Upstream provider failure.
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,

            // 5xx (BadConfig/Bind/Server are startup-only).
            AppError::BadConfig(_)
            | AppError::Bind(_)
            | AppError::Server(_)
            | AppError::Retrieval(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::BadConfig(_) => "CONFIG_ERROR",
            AppError::Bind(_) => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Retrieval(_) => "RETRIEVAL_FAILED",
            AppError::Generation(_) => "GENERATION_FAILED",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorBody {
            error: self.error_code(),
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retrieval_failures_map_to_500() {
        let err = AppError::from(FaqRagError::Embedding("down".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.error_code(), "RETRIEVAL_FAILED");
    }

    #[test]
    fn generation_failures_map_to_502() {
        use llm_service::error_handler::{ProviderError, ProviderErrorKind};

        let err = AppError::from(LlmError::from(ProviderError::new(
            ProviderErrorKind::EmptyChoices,
        )));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.error_code(), "GENERATION_FAILED");
    }
}
