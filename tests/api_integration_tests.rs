//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use std::collections::HashSet;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tokio_test::assert_ok;
use tower::ServiceExt;
use word_shuffle::{api::create_router, words::WordStore, AppState};

// == Helper Functions ==

fn create_test_state(words: &[&str]) -> AppState {
    AppState::with_words(WordStore::new(
        words.iter().map(|w| w.to_string()).collect(),
    ))
}

fn create_test_app() -> Router {
    create_router(create_test_state(&["alpha", "beta"]))
}

fn request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Fetches /metrics and returns the value of the sample line `name`.
async fn scrape(app: &Router, name: &str) -> u64 {
    let response = app.clone().oneshot(request("GET", "/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = body_to_string(response.into_body()).await;

    text.lines()
        .filter(|line| !line.starts_with('#'))
        .find_map(|line| {
            let (sample, value) = line.rsplit_once(' ')?;
            (sample == name).then(|| value.parse().unwrap())
        })
        .unwrap_or_else(|| panic!("sample {} missing from exposition", name))
}

// == Index Endpoint Tests ==

#[tokio::test]
async fn test_index_endpoint_returns_description() {
    let app = create_test_app();

    let response = assert_ok!(app.oneshot(request("GET", "/")).await);

    assert_eq!(response.status(), StatusCode::OK);
    let text = body_to_string(response.into_body()).await;
    assert!(text.starts_with("Word Shuffle API v"));
    assert!(text.ends_with('\n'));
}

#[tokio::test]
async fn test_index_counter() {
    let app = create_test_app();

    for _ in 0..2 {
        let response = app.clone().oneshot(request("GET", "/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    assert_eq!(scrape(&app, "word_shuffle_index").await, 2);
}

// == READ Endpoint Tests ==

#[tokio::test]
async fn test_read_endpoint_returns_known_word() {
    let app = create_test_app();
    let mut uids = HashSet::new();

    for _ in 0..20 {
        let response = app.clone().oneshot(request("GET", "/read")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_to_json(response.into_body()).await;
        let value = json["value"].as_str().unwrap();
        assert!(value == "alpha" || value == "beta");

        let uid = json["uid"].as_u64().unwrap();
        assert_ne!(uid, 0);
        assert!(uids.insert(uid), "uid {} returned twice", uid);
    }
}

#[tokio::test]
async fn test_read_endpoint_uids_increase() {
    let app = create_test_app();
    let mut last = 0;

    for _ in 0..10 {
        let response = app.clone().oneshot(request("GET", "/read")).await.unwrap();
        let json = body_to_json(response.into_body()).await;
        let uid = json["uid"].as_u64().unwrap();
        assert!(uid > last);
        last = uid;
    }
}

#[tokio::test]
async fn test_read_endpoint_empty_store() {
    let app = create_router(create_test_state(&[]));

    let response = app.clone().oneshot(request("GET", "/read")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
    assert_eq!(scrape(&app, "word_shuffle_errors").await, 1);
}

#[tokio::test]
async fn test_read_endpoint_wrong_verb() {
    let state = create_test_state(&["alpha", "beta"]);
    let app = create_router(state.clone());

    for method in ["POST", "PUT", "DELETE", "PATCH"] {
        let response = app.clone().oneshot(request(method, "/read")).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    assert_eq!(scrape(&app, "word_shuffle_req{method=\"read\"}").await, 0);
    assert_eq!(scrape(&app, "word_shuffle_errors").await, 0);
    assert_eq!(scrape(&app, "word_shuffle_warnings").await, 4);
}

// == Placeholder Endpoint Tests ==

#[tokio::test]
async fn test_create_endpoint_not_implemented() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/create")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"value":"gamma"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(scrape(&app, "word_shuffle_req{method=\"create\"}").await, 1);
    assert_eq!(scrape(&app, "word_shuffle_errors").await, 0);
}

#[tokio::test]
async fn test_update_endpoint_not_implemented() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/update")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"value_old":"alpha","value_new":"gamma"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_IMPLEMENTED);
    assert_eq!(scrape(&app, "word_shuffle_req{method=\"update\"}").await, 1);
}

#[tokio::test]
async fn test_create_endpoint_malformed_body() {
    let app = create_test_app();

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/create")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
    assert_eq!(scrape(&app, "word_shuffle_errors").await, 0);
}

#[tokio::test]
async fn test_delete_endpoint_wrong_verb() {
    let app = create_test_app();

    let response = app.clone().oneshot(request("GET", "/delete")).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(scrape(&app, "word_shuffle_req{method=\"delete\"}").await, 0);
}

// == METRICS Endpoint Tests ==

#[tokio::test]
async fn test_metrics_reflect_operations() {
    let app = create_test_app();

    for _ in 0..3 {
        let response = app.clone().oneshot(request("GET", "/read")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
    let rejected = app.clone().oneshot(request("POST", "/read")).await.unwrap();
    assert_eq!(rejected.status(), StatusCode::METHOD_NOT_ALLOWED);

    assert_eq!(scrape(&app, "word_shuffle_req{method=\"read\"}").await, 3);
    assert_eq!(scrape(&app, "word_shuffle_errors").await, 0);
    assert_eq!(scrape(&app, "word_shuffle_index").await, 0);
}

#[tokio::test]
async fn test_metrics_content_type() {
    let app = create_test_app();

    let response = app.oneshot(request("GET", "/metrics")).await.unwrap();

    assert_eq!(
        response.headers()["content-type"],
        "text/plain; version=0.0.4"
    );
}

// == Draining Tests ==

#[tokio::test]
async fn test_requests_rejected_while_draining() {
    let state = create_test_state(&["alpha"]);
    let app = create_router(state.clone());
    state.shutdown.begin_drain();

    for uri in ["/", "/metrics", "/read"] {
        let response = app.clone().oneshot(request("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    let snapshot = state.metrics.snapshot();
    assert_eq!(snapshot.index, 0);
    assert_eq!(snapshot.read, 0);
}
