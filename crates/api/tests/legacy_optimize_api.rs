//! Integration tests for the legacy optimize route (`/api/legacy/optimize`).

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Response, StatusCode};
use serde_json::json;

use common::{body_json, build_test_app, post_json, send, FakeCompletion, Reply};

const URI: &str = "/api/legacy/optimize";

/// Comfortably over the 50-character minimum.
const SOURCE: &str = "module 0x1::counter {\n    public fun increment(c: &mut u64) { *c = *c + 1; }\n}";

fn assert_permissive_cors(response: &Response<Body>) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(headers["access-control-allow-methods"], "POST, OPTIONS");
    assert_eq!(headers["access-control-allow-headers"], "Content-Type");
}

// ---------------------------------------------------------------------------
// Test: success shape uses the legacy field names
// ---------------------------------------------------------------------------

#[tokio::test]
async fn success_uses_legacy_shape() {
    let fake = FakeCompletion::text(
        "module 0x1::counter {\n    // Gas savings: 7% - removed redundant copy\n    // Security: no issues found\n    // Performance: inlined increment\n    public fun increment(c: &mut u64) { *c = *c + 1; }\n}",
    );
    let app = build_test_app(Arc::clone(&fake));

    let response = post_json(
        app,
        URI,
        json!({ "moveCode": SOURCE, "analysisLevel": "exhaustive" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_permissive_cors(&response);

    let json = body_json(response).await;
    assert_eq!(
        json["metrics"],
        json!({
            "gasSavings": "7% - removed redundant copy",
            "securityFindings": ["no issues found"],
            "performanceImprovement": "inlined increment",
        })
    );
    assert_eq!(json["analysisLevel"], "exhaustive");
    assert!(json.get("analysis").is_none());
    assert!(json.get("warnings").is_none());
    assert_eq!(fake.calls(), 1);
}

#[tokio::test]
async fn untagged_completion_uses_legacy_placeholders() {
    let fake = FakeCompletion::text("module M { fun f() {} }");
    let app = build_test_app(fake);

    let response = post_json(app, URI, json!({ "moveCode": SOURCE })).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["metrics"]["gasSavings"], "0%");
    assert_eq!(json["metrics"]["securityFindings"], json!([]));
    assert_eq!(json["metrics"]["performanceImprovement"], "Not quantified");
    assert_eq!(json["analysisLevel"], "advanced");
}

#[tokio::test]
async fn legacy_markers_produce_warnings() {
    let fake = FakeCompletion::text("module M {\n    // TODO: audit\n    fun f() { unsafe_op(); }\n}");
    let app = build_test_app(fake);

    let response = post_json(app, URI, json!({ "moveCode": SOURCE })).await;
    let json = body_json(response).await;
    assert_eq!(
        json["warnings"],
        json!(["Contains unsafe operations", "Contains unresolved TODO items"])
    );
}

// ---------------------------------------------------------------------------
// Test: validation failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn non_string_goal_returns_400() {
    let fake = FakeCompletion::text("module M { fun f() {} }");
    let app = build_test_app(Arc::clone(&fake));

    let response = post_json(
        app,
        URI,
        json!({ "moveCode": "x".repeat(64), "optimizationGoals": ["gas", 5] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_permissive_cors(&response);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid optimization goals format", "code": "VALIDATION_ERROR" })
    );
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn short_code_returns_400() {
    let fake = FakeCompletion::text("module M { fun f() {} }");
    let app = build_test_app(Arc::clone(&fake));

    let response = post_json(app, URI, json!({ "moveCode": "module M {}" })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Move code must be at least 50 characters"
    );
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn missing_code_returns_400() {
    let fake = FakeCompletion::text("module M { fun f() {} }");
    let app = build_test_app(Arc::clone(&fake));

    let response = post_json(app, URI, json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Move code is required");
    assert_eq!(fake.calls(), 0);
}

// ---------------------------------------------------------------------------
// Test: upstream and acceptance failures
// ---------------------------------------------------------------------------

#[tokio::test]
async fn completion_without_move_tokens_returns_500() {
    let fake = FakeCompletion::text("I'm sorry, I can only help with Solidity.");
    let app = build_test_app(fake);

    let response = post_json(app, URI, json!({ "moveCode": SOURCE })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_permissive_cors(&response);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid optimization response format"
    );
}

#[tokio::test]
async fn empty_choices_returns_500() {
    let fake = FakeCompletion::new(Reply::NoChoices);
    let app = build_test_app(fake);

    let response = post_json(app, URI, json!({ "moveCode": SOURCE })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await["error"],
        "Completion response contained no choices"
    );
}

#[tokio::test]
async fn panic_returns_500_with_cors_headers() {
    let app = build_test_app(FakeCompletion::new(Reply::Panic));

    let response = post_json(app, URI, json!({ "moveCode": SOURCE })).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_permissive_cors(&response);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Optimization failed", "code": "INTERNAL_ERROR" })
    );
}

#[tokio::test]
async fn slow_completion_is_not_cut_short() {
    let fake = FakeCompletion::new(Reply::Delayed(
        Duration::from_millis(1200),
        "module M {\n    // Gas savings: 3%\n    fun f() {}\n}".to_string(),
    ));
    let app = build_test_app(Arc::clone(&fake));

    let response = post_json(app, URI, json!({ "moveCode": SOURCE })).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_permissive_cors(&response);
    assert_eq!(body_json(response).await["metrics"]["gasSavings"], "3%");
    assert_eq!(fake.calls(), 1);
}

// ---------------------------------------------------------------------------
// Test: method handling
// ---------------------------------------------------------------------------

#[tokio::test]
async fn options_returns_200_with_cors_headers() {
    let fake = FakeCompletion::text("module M { fun f() {} }");
    let app = build_test_app(Arc::clone(&fake));

    let response = send(app, Method::OPTIONS, URI, Body::empty()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_permissive_cors(&response);
    assert_eq!(fake.calls(), 0);
}

#[tokio::test]
async fn other_methods_return_405() {
    for method in [Method::GET, Method::PUT, Method::DELETE] {
        let app = build_test_app(FakeCompletion::text("module M { fun f() {} }"));
        let response = send(app, method.clone(), URI, Body::empty()).await;

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{method}");
        assert_permissive_cors(&response);
        assert_eq!(body_json(response).await["error"], "Method not allowed");
    }
}
