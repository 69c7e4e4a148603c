use std::sync::Arc;

use asco_completion::CompletionClient;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Completion provider handle. Injected so tests can swap in a fake.
    pub completion: Arc<dyn CompletionClient>,
}
