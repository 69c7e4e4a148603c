//! Route definitions for both optimize entry points.

use axum::http::header::{
    ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
};
use axum::http::HeaderValue;
use axum::routing::post;
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::set_header::SetResponseHeaderLayer;

use crate::error::panic_response;
use crate::handlers::{legacy, optimize};
use crate::state::AppState;

/// Routes mounted at `/api/v1`.
///
/// ```text
/// POST   /optimize   -> optimize
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/optimize", post(optimize::optimize))
}

/// Routes mounted at `/api/legacy`.
///
/// Every response, including errors, panics and the 405 fallback, carries
/// permissive CORS headers.
///
/// ```text
/// POST    /optimize   -> legacy_optimize
/// OPTIONS /optimize   -> legacy_preflight
/// *       /optimize   -> 405
/// ```
pub fn legacy_router() -> Router<AppState> {
    Router::new()
        .route(
            "/optimize",
            post(legacy::legacy_optimize)
                .options(legacy::legacy_preflight)
                .fallback(legacy::method_not_allowed),
        )
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("POST, OPTIONS"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}
