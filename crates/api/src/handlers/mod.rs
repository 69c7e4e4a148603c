pub mod legacy;
pub mod optimize;

use asco_core::request::MSG_INVALID_BODY;
use axum::body::Bytes;
use serde_json::Value;

use crate::error::{AppError, AppResult};

/// Parse a request body as JSON regardless of its `Content-Type`.
///
/// Field-level checks happen in `asco_core::request`; this only rejects
/// bytes that are not JSON at all.
pub(crate) fn parse_json_body(body: &Bytes) -> AppResult<Value> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(error = %err, "Rejected non-JSON request body");
        AppError::BadRequest(MSG_INVALID_BODY.to_string())
    })
}
