//! HTTP API integration tests
//!
//! These drive the router directly with `tower::ServiceExt::oneshot`. The
//! countdown task is not spawned here, so the timer never ticks on its own;
//! timing behavior is covered by the countdown integration tests.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use stopclock::{api::create_router, state::AppState};

fn test_app() -> Router {
    let state = Arc::new(AppState::new(8642, "127.0.0.1".to_string()));
    create_router(state)
}

async fn post_json(app: &Router, path: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_empty(app: &Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(app: &Router, path: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_reports_ok() {
    let app = test_app();

    let (status, body) = get_json(&app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn start_begins_countdown() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/start",
        json!({"hours": 0, "minutes": 1, "seconds": 5}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["timer"]["display"], "00:01:05");
    assert_eq!(body["timer"]["phase"], "running");
    assert_eq!(body["timer"]["running"], true);
    assert_eq!(body["timer"]["inputs_locked"], true);
    assert_eq!(body["timer"]["start_locked"], true);
}

#[tokio::test]
async fn start_with_zero_total_is_rejected() {
    let app = test_app();

    let (status, body) = post_json(&app, "/start", json!({})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "Please enter a valid time");
    assert_eq!(body["timer"]["phase"], "idle");

    // Nothing changed
    let (_, status_body) = get_json(&app, "/status").await;
    assert_eq!(status_body["timer"]["display"], "00:00:00");
    assert_eq!(status_body["timer"]["running"], false);
}

#[tokio::test]
async fn start_clamps_out_of_range_values() {
    let app = test_app();

    let (status, body) = post_json(
        &app,
        "/start",
        json!({"hours": 200, "minutes": 99, "seconds": -10}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["display"], "99:59:00");
}

#[tokio::test]
async fn start_while_running_is_a_noop() {
    let app = test_app();

    post_json(&app, "/start", json!({"seconds": 30})).await;
    let (status, body) = post_json(&app, "/start", json!({"seconds": 99})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "noop");
    assert_eq!(body["timer"]["display"], "00:00:30");
}

#[tokio::test]
async fn stop_without_running_is_a_silent_noop() {
    let app = test_app();

    let (status, body) = post_empty(&app, "/stop").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "noop");
    assert_eq!(body["timer"]["phase"], "idle");
}

#[tokio::test]
async fn stop_freezes_the_countdown() {
    let app = test_app();

    post_json(&app, "/start", json!({"minutes": 2})).await;
    let (status, body) = post_empty(&app, "/stop").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["timer"]["phase"], "stopped");
    assert_eq!(body["timer"]["display"], "00:02:00");
    // Start unlocks, time-entry inputs stay locked until reset
    assert_eq!(body["timer"]["start_locked"], false);
    assert_eq!(body["timer"]["inputs_locked"], true);
}

#[tokio::test]
async fn lap_requires_a_running_countdown() {
    let app = test_app();

    let (status, body) = post_empty(&app, "/lap").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "noop");
    assert_eq!(body["timer"]["lap_counter"], 1);

    let (_, status_body) = get_json(&app, "/status").await;
    assert_eq!(status_body["laps"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn laps_are_listed_newest_first() {
    let app = test_app();

    post_json(&app, "/start", json!({"minutes": 1})).await;

    let (_, first) = post_empty(&app, "/lap").await;
    assert_eq!(first["status"], "ok");
    assert_eq!(first["message"], "Lap 1 recorded at 00:01:00");

    let (_, second) = post_empty(&app, "/lap").await;
    assert_eq!(second["message"], "Lap 2 recorded at 00:01:00");

    let (_, status_body) = get_json(&app, "/status").await;
    let laps = status_body["laps"].as_array().unwrap();
    assert_eq!(laps.len(), 2);
    assert_eq!(laps[0]["index"], 2);
    assert_eq!(laps[1]["index"], 1);
    assert_eq!(status_body["timer"]["lap_counter"], 3);
}

#[tokio::test]
async fn reset_returns_the_timer_to_idle() {
    let app = test_app();

    post_json(&app, "/start", json!({"minutes": 5})).await;
    post_empty(&app, "/lap").await;

    let (status, body) = post_empty(&app, "/reset").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["timer"]["phase"], "idle");
    assert_eq!(body["timer"]["display"], "00:00:00");
    assert_eq!(body["timer"]["lap_counter"], 1);
    assert_eq!(body["timer"]["inputs_locked"], false);
    assert_eq!(body["timer"]["start_locked"], false);

    let (_, status_body) = get_json(&app, "/status").await;
    assert_eq!(status_body["laps"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn status_includes_server_metadata() {
    let app = test_app();

    let (status, body) = get_json(&app, "/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["port"], 8642);
    assert_eq!(body["host"], "127.0.0.1");
    assert!(body["uptime"].is_string());
    assert!(body["last_action"].is_null());

    post_json(&app, "/start", json!({"seconds": 5})).await;
    let (_, body) = get_json(&app, "/status").await;
    assert_eq!(body["last_action"], "start");
    assert!(body["last_action_time"].is_string());
}
