//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use gotcha::{api::create_router, cache::Store, AppState};
use serde_json::{json, Value};
use std::thread::sleep;
use std::time::Duration;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::new(Store::new()))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

// == SET / GET Endpoint Tests ==

#[tokio::test]
async fn test_set_endpoint_success() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request(
            "PUT",
            "/set",
            json!({"key": "test_key", "value": "test_value"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert!(json["message"].as_str().unwrap().contains("test_key"));
}

#[tokio::test]
async fn test_set_endpoint_empty_key() {
    let app = create_test_app();

    let response = app
        .oneshot(json_request("PUT", "/set", json!({"key": "", "value": 1})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_set_then_get_null_value() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request("PUT", "/set", json!({"key": "nil", "value": null})))
        .await
        .unwrap();

    let response = app.oneshot(empty_request("GET", "/get/nil")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["key"], "nil");
    assert_eq!(json["value"], Value::Null);
}

#[tokio::test]
async fn test_get_expired_then_include_expired() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/set",
            json!({"key": "short", "value": 7, "ttl_ms": 10}),
        ))
        .await
        .unwrap();

    sleep(Duration::from_millis(15));

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/get/short"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("expired"));

    let response = app
        .oneshot(empty_request("GET", "/get/short?include_expired=true"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["value"], 7);
}

// == DELETE Endpoint Tests ==

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request("PUT", "/set", json!({"key": "gone", "value": 1})))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/del/gone"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["removed"], true);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/del/gone"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["removed"], false);

    let response = app.oneshot(empty_request("GET", "/get/gone")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// == Bulk Endpoint Tests ==

#[tokio::test]
async fn test_mset_then_mget() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/mset",
            json!({"keys": ["a", "b", "c"], "values": [1, "two", null]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_to_json(response.into_body()).await["count"], 3);

    let response = app
        .oneshot(json_request(
            "POST",
            "/mget",
            json!({"keys": ["c", "missing", "a", "b"]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert_eq!(items[0], json!({"key": "c", "found": true, "value": null}));
    assert_eq!(items[1], json!({"key": "missing", "found": false, "value": null}));
    assert_eq!(items[2]["value"], 1);
    assert_eq!(items[3]["value"], "two");
}

#[tokio::test]
async fn test_mset_length_mismatch() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/mset",
            json!({"keys": ["a", "b"], "values": [1]}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.oneshot(empty_request("GET", "/stats")).await.unwrap();
    assert_eq!(body_to_json(response.into_body()).await["total_entries"], 0);
}

// == TTL Endpoint Tests ==

#[tokio::test]
async fn test_extend_refuses_expired_unless_forced() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/set",
            json!({"key": "k", "value": 1, "ttl_ms": 10}),
        ))
        .await
        .unwrap();

    sleep(Duration::from_millis(15));

    let response = app
        .clone()
        .oneshot(json_request("POST", "/extend/k", json!({"ttl_ms": 60000})))
        .await
        .unwrap();
    assert_eq!(body_to_json(response.into_body()).await["extended"], false);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/extend/k",
            json!({"ttl_ms": 60000, "force": true}),
        ))
        .await
        .unwrap();
    assert_eq!(body_to_json(response.into_body()).await["extended"], true);

    let response = app.oneshot(empty_request("GET", "/get/k")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_meta_endpoint() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request("PUT", "/set", json!({"key": "m", "value": 1})))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/meta/m"))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["exists"], true);
    assert_eq!(json["expired"], false);
    assert!(json["timestamp"].is_string());
    assert_eq!(json["ttl_remaining_ms"], Value::Null);

    let response = app
        .oneshot(empty_request("GET", "/meta/absent"))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["exists"], false);
    assert_eq!(json["expired"], false);
    assert_eq!(json["timestamp"], Value::Null);
}

#[tokio::test]
async fn test_cleanup_removes_only_expired() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/set",
            json!({"key": "a", "value": 1, "ttl_ms": 10}),
        ))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request("PUT", "/set", json!({"key": "b", "value": 2})))
        .await
        .unwrap();

    sleep(Duration::from_millis(15));

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/stats"))
        .await
        .unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["total_entries"], 2);
    assert_eq!(json["expired_entries"], 1);

    let response = app
        .clone()
        .oneshot(empty_request("POST", "/cleanup"))
        .await
        .unwrap();
    assert_eq!(body_to_json(response.into_body()).await["removed"], 1);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/meta/a"))
        .await
        .unwrap();
    assert_eq!(body_to_json(response.into_body()).await["exists"], false);

    let response = app.oneshot(empty_request("GET", "/get/b")).await.unwrap();
    assert_eq!(body_to_json(response.into_body()).await["value"], 2);
}

// == Purge / Health Endpoint Tests ==

#[tokio::test]
async fn test_purge_endpoint() {
    let app = create_test_app();

    app.clone()
        .oneshot(json_request(
            "PUT",
            "/mset",
            json!({"keys": ["x", "y"], "values": [1, 2]}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("POST", "/purge"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.oneshot(empty_request("GET", "/stats")).await.unwrap();
    assert_eq!(body_to_json(response.into_body()).await["total_entries"], 0);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(empty_request("GET", "/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
}
