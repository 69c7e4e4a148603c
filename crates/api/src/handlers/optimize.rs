//! Handler for `POST /api/v1/optimize`.

use asco_completion::CompletionRequest;
use asco_core::prompt::{self, OPTIMIZE_MAX_TOKENS, OPTIMIZE_TEMPERATURE};
use asco_core::request;
use asco_core::response::OptimizationResponse;
use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::parse_json_body;
use crate::state::AppState;

/// Optimize a Move module.
///
/// Validates the module declaration, goals and analysis level, makes one
/// completion call, then extracts `// GAS:`, `// SECURITY:` and
/// `// PERFORMANCE:` tags from the returned code.
pub async fn optimize(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<OptimizationResponse>> {
    run(&state, &body)
        .await
        .map(Json)
        .inspect_err(|err| tracing::error!(error = %err, "Optimization failed"))
}

async fn run(state: &AppState, body: &Bytes) -> AppResult<OptimizationResponse> {
    let body = parse_json_body(body)?;
    let req = request::parse_optimize_request(&body)?;

    let completion = state
        .completion
        .complete(&CompletionRequest {
            messages: prompt::optimize_messages(&req),
            temperature: OPTIMIZE_TEMPERATURE,
            max_tokens: OPTIMIZE_MAX_TOKENS,
        })
        .await?;

    let response = OptimizationResponse::from_completion(&req, &completion)?;

    tracing::info!(
        level = %req.level,
        goals = ?req.goals,
        security_findings = response.metrics.security.len(),
        warnings = response.warnings.as_ref().map_or(0, Vec::len),
        "Optimization completed"
    );

    Ok(response)
}
