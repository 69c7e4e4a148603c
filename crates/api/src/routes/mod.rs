pub mod health;
pub mod optimize;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /optimize        optimize a Move module (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(optimize::router())
}

/// Build the `/api/legacy` route tree.
///
/// ```text
/// /optimize        legacy optimize contract (POST, OPTIONS)
/// ```
pub fn legacy_routes() -> Router<AppState> {
    optimize::legacy_router()
}
