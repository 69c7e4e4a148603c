use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Model id optimization calls are sent to.
    pub model: String,
    /// Whether the completion provider has credentials.
    pub completion_configured: bool,
}

/// GET /health -- returns service health and completion readiness.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let completion_configured = state.completion.is_configured();

    let status = if completion_configured { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        model: state.completion.model().to_string(),
        completion_configured,
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
