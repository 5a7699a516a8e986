use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::compliance::router::compliance_router;

fn build_router() -> axum::Router {
    let (service, _, _) = build_service();
    compliance_router(Arc::new(service))
}

async fn read_json_body(response: axum::response::Response) -> Value {
    let body = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .expect("request")
}

#[tokio::test]
async fn post_entities_returns_record_view() {
    let router = build_router();
    let payload = serde_json::to_value(row("ent-50")).expect("serialize row");

    let response = router
        .oneshot(json_request("POST", "/api/v1/entities", payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body.get("entity_id"), Some(&json!("ent-50")));
    assert_eq!(body.get("recent_signal_count"), Some(&json!(0)));
}

#[tokio::test]
async fn malformed_dates_are_unprocessable() {
    let router = build_router();
    let mut raw = row("ent-51");
    raw.formation_date = Some("Jan 10 2024".to_string());
    let payload = serde_json::to_value(raw).expect("serialize row");

    let response = router
        .oneshot(json_request("POST", "/api/v1/entities", payload))
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .contains("formation_date"));
}

#[tokio::test]
async fn health_endpoint_honors_the_pinned_clock() {
    let router = build_router();
    let payload = serde_json::to_value(row("ent-52")).expect("serialize row");
    let response = router
        .clone()
        .oneshot(json_request("POST", "/api/v1/entities", payload))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/entities/ent-52/health?as_of=2025-03-01")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body.get("score"), Some(&json!(80)));
    assert_eq!(body.get("indicator"), Some(&json!("amber")));
}

#[tokio::test]
async fn unknown_entities_are_not_found() {
    let router = build_router();

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/entities/ghost/health?as_of=2025-03-01")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_as_of_is_a_bad_request() {
    let router = build_router();
    let payload = serde_json::to_value(row("ent-53")).expect("serialize row");
    router
        .clone()
        .oneshot(json_request("POST", "/api/v1/entities", payload))
        .await
        .expect("router dispatch");

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/entities/ent-53/health?as_of=March")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn recorded_signals_reorder_recommendations() {
    let router = build_router();
    let payload = serde_json::to_value(row("ent-54")).expect("serialize row");
    router
        .clone()
        .oneshot(json_request("POST", "/api/v1/entities", payload))
        .await
        .expect("router dispatch");

    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/entities/ent-54/signals",
            json!({ "signal": "documents" }),
        ))
        .await
        .expect("router dispatch");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/entities/ent-54/services?as_of=2025-08-06")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("router dispatch");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let ranked = body.as_array().expect("ranked array");
    let certified = ranked
        .iter()
        .find(|entry| entry["service"]["id"] == json!("certified-copies"))
        .expect("certified copies present");
    assert_eq!(certified.get("relevance_score"), Some(&json!(50)));
}
