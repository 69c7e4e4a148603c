#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use asco_api::config::ServerConfig;
use asco_api::router::build_app_router;
use asco_api::state::AppState;
use asco_completion::{CompletionClient, CompletionConfig, CompletionError, CompletionRequest};

/// Build a test `ServerConfig` with safe defaults.
///
/// Uses `http://localhost:3000` as CORS origin (matching the dev default).
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        completion: CompletionConfig {
            api_key: Some("test-key".to_string()),
            base_url: "http://127.0.0.1:9".to_string(),
            model: "fake-model".to_string(),
        },
    }
}

/// Build the full application router around the given completion client.
///
/// Goes through `build_app_router` so integration tests exercise the same
/// middleware stack (CORS, request ID, tracing, panic recovery)
/// that production uses.
pub fn build_test_app(completion: Arc<FakeCompletion>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        completion,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fake completion provider
// ---------------------------------------------------------------------------

/// Scripted outcome for every call to [`FakeCompletion`].
#[derive(Debug, Clone)]
pub enum Reply {
    Text(String),
    ApiError { status: u16, body: String },
    NoChoices,
    Panic,
    /// Answer with the text after sleeping for the given duration.
    Delayed(Duration, String),
}

/// Completion client that answers with a fixed [`Reply`] and records calls.
pub struct FakeCompletion {
    reply: Reply,
    configured: bool,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl FakeCompletion {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            configured: true,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn text(text: &str) -> Arc<Self> {
        Self::new(Reply::Text(text.to_string()))
    }

    pub fn unconfigured() -> Arc<Self> {
        Arc::new(Self {
            reply: Reply::NoChoices,
            configured: false,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for FakeCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::ApiError { status, body } => Err(CompletionError::Api {
                status: *status,
                body: body.clone(),
            }),
            Reply::NoChoices => Err(CompletionError::NoChoices),
            Reply::Panic => panic!("fake provider exploded"),
            Reply::Delayed(delay, text) => {
                tokio::time::sleep(*delay).await;
                Ok(text.clone())
            }
        }
    }

    fn model(&self) -> &str {
        "fake-model"
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}

// ---------------------------------------------------------------------------
// HTTP helpers
// ---------------------------------------------------------------------------

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, Body::empty()).await
}

/// Send a POST request with a JSON body through the router.
pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Send an arbitrary request with a raw body through the router.
pub async fn send(app: Router, method: Method, uri: &str, body: Body) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body)
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
