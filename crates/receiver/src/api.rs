//! HTTP API: health check, snapshot pull and the watch-event ingest
//! boundary where the watch subsystem attaches.

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use collection_lib::{Collector, WatchEvent};
use serde_json::json;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub collector: Arc<Collector>,
}

impl AppState {
    pub fn new(collector: Arc<Collector>) -> Self {
        Self { collector }
    }
}

/// Health check response - the receiver has no degraded states; it is
/// healthy as long as it serves
async fn healthz() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "version": env!("CARGO_PKG_VERSION"),
        })),
    )
}

/// On-demand consolidated snapshot of all cached metric records
async fn snapshot(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.collector.collect(Utc::now())))
}

/// Ingests one resource-change event. Add/update events also run the
/// metadata derivation; its entries are handed to the metadata sink (here:
/// the debug log, transport is out of scope).
async fn ingest_event(
    State(state): State<Arc<AppState>>,
    Json(event): Json<WatchEvent>,
) -> impl IntoResponse {
    if matches!(event, WatchEvent::Added(_) | WatchEvent::Updated(_)) {
        let entries = state.collector.sync_metadata(event.object());
        if !entries.is_empty() {
            debug!(
                kind = %event.object().kind_label(),
                entities = entries.len(),
                "derived metadata entries"
            );
        }
    }
    state.collector.apply(&event);
    StatusCode::ACCEPTED
}

/// Create the API router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/snapshot", get(snapshot))
        .route("/events", post(ingest_event))
        .with_state(state)
}

/// Start the API server
pub async fn serve(port: u16, state: Arc<AppState>) -> anyhow::Result<()> {
    let app = create_router(state);

    let addr = format!("0.0.0.0:{}", port);
    info!(addr = %addr, "Starting API server");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
