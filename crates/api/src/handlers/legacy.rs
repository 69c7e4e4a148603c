//! Handlers for the legacy optimize route.
//!
//! Kept separate from `/api/v1/optimize`: different minimum-length check,
//! different tag vocabulary and a flat response shape.

use asco_completion::CompletionRequest;
use asco_core::prompt::{self, OPTIMIZE_MAX_TOKENS, OPTIMIZE_TEMPERATURE};
use asco_core::request;
use asco_core::response::LegacyOptimizationResponse;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::handlers::parse_json_body;
use crate::state::AppState;

/// POST -- optimize with the legacy contract.
pub async fn legacy_optimize(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<LegacyOptimizationResponse>> {
    run(&state, &body)
        .await
        .map(Json)
        .inspect_err(|err| tracing::error!(error = %err, "Legacy optimization failed"))
}

async fn run(state: &AppState, body: &Bytes) -> AppResult<LegacyOptimizationResponse> {
    let body = parse_json_body(body)?;
    let req = request::parse_legacy_request(&body)?;

    let completion = state
        .completion
        .complete(&CompletionRequest {
            messages: prompt::legacy_messages(&req),
            temperature: OPTIMIZE_TEMPERATURE,
            max_tokens: OPTIMIZE_MAX_TOKENS,
        })
        .await?;

    let response = LegacyOptimizationResponse::from_completion(&req, &completion)?;

    tracing::info!(
        analysis_level = %req.analysis_level,
        security_findings = response.metrics.security_findings.len(),
        "Legacy optimization completed"
    );

    Ok(response)
}

/// OPTIONS -- CORS preflight. Headers come from the route's layer.
pub async fn legacy_preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method.
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
