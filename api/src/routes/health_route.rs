//! GET /health — liveness probe.
//!
//! The index and LLM client are built before the listener binds, so a
//! reachable server implies a ready one.

use axum::{http::StatusCode, response::Response};
use serde::Serialize;

use crate::core::http::response_envelope::ApiResponse;

#[derive(Serialize)]
pub struct HealthBody {
    pub status: &'static str,
}

pub async fn health() -> Response {
    ApiResponse::success(HealthBody { status: "ok" }).into_response_with_status(StatusCode::OK)
}
