//! Integration tests for the receiver API endpoints

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use collection_lib::{Collector, CollectorConfig, WatchEvent};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

#[derive(Clone)]
pub struct AppState {
    pub collector: Arc<Collector>,
}

async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({"status": "healthy", "version": env!("CARGO_PKG_VERSION")})),
    )
}

async fn snapshot(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.collector.collect(Utc::now())))
}

async fn ingest_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<WatchEvent>,
) -> impl IntoResponse {
    state.collector.apply(&event);
    StatusCode::ACCEPTED
}

fn create_test_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/snapshot", get(snapshot))
        .route("/events", post(ingest_event))
        .with_state(state)
}

fn setup_test_app() -> (Router, Arc<AppState>) {
    let collector = Arc::new(Collector::new(CollectorConfig::default()));
    let state = Arc::new(AppState { collector });
    let router = create_test_router(state.clone());
    (router, state)
}

fn pod_event(op: &str, uid: &str) -> serde_json::Value {
    json!({
        "op": op,
        "event": {
            "kind": "Pod",
            "object": {
                "meta": {
                    "uid": uid,
                    "name": "web-0",
                    "namespace": "default"
                },
                "phase": "Running",
                "containers": [
                    {"name": "app", "container_id": "docker://aaa", "ready": true}
                ]
            }
        }
    })
}

async fn post_event(app: &Router, event: &serde_json::Value) -> StatusCode {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/events")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(event.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    response.status()
}

async fn get_snapshot(app: &Router) -> serde_json::Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/snapshot")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_healthz_returns_ok() {
    let (app, _state) = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let health: serde_json::Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(health["status"], "healthy");
}

#[tokio::test]
async fn test_ingested_event_shows_up_in_snapshot() {
    let (app, _state) = setup_test_app();

    let status = post_event(&app, &pod_event("Added", "pod-1")).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let snapshot = get_snapshot(&app).await;
    let records = snapshot["records"].as_array().unwrap();
    assert!(!records.is_empty());
    assert!(records
        .iter()
        .any(|r| r["name"] == "k8s.pod.phase" && r["tags"]["k8s.pod.uid"] == "pod-1"));
}

#[tokio::test]
async fn test_deleted_event_removes_records_from_snapshot() {
    let (app, _state) = setup_test_app();

    post_event(&app, &pod_event("Added", "pod-1")).await;
    post_event(&app, &pod_event("Deleted", "pod-1")).await;

    let snapshot = get_snapshot(&app).await;
    assert!(snapshot["records"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_event_is_swallowed() {
    let (app, _state) = setup_test_app();

    post_event(&app, &pod_event("Added", "pod-1")).await;
    // no uid: identity resolution fails, event is logged and dropped
    let status = post_event(&app, &pod_event("Added", "")).await;
    assert_eq!(status, StatusCode::ACCEPTED);

    let snapshot = get_snapshot(&app).await;
    let records = snapshot["records"].as_array().unwrap();
    assert!(records
        .iter()
        .all(|r| r["tags"]["k8s.pod.uid"] == "pod-1"));
}
