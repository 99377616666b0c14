//! Cluster State Receiver - cluster-metadata/metrics collection service
//!
//! Receives resource-change notifications for cluster objects, keeps an
//! incremental metrics cache, and exports consolidated snapshots on a
//! periodic timer.

use anyhow::Result;
use chrono::Utc;
use collection_lib::{Collector, CollectorConfig};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and env filter
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().json())
        .init();

    info!("Starting cluster-receiver");

    // Load configuration
    let config = config::ReceiverConfig::load()?;
    info!(
        export_interval_secs = config.export_interval_secs,
        "Receiver configured"
    );

    let collector = Arc::new(Collector::new(CollectorConfig {
        node_conditions_to_report: config.node_conditions_to_report.clone(),
        allocatable_types_to_report: config.allocatable_types_to_report.clone(),
    }));

    // Create shared application state
    let app_state = Arc::new(api::AppState::new(collector.clone()));

    // Start the API server
    let _api_handle = tokio::spawn(api::serve(config.api_port, app_state));

    // Periodic export loop pulling consolidated snapshots
    let export_interval = Duration::from_secs(config.export_interval_secs);
    let export_collector = collector.clone();
    let _export_handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(export_interval);
        loop {
            ticker.tick().await;
            let snapshot = export_collector.collect(Utc::now());
            info!(records = snapshot.records.len(), "exported metrics snapshot");
            if let Ok(payload) = serde_json::to_string(&snapshot) {
                debug!(payload = %payload, "snapshot payload");
            }
        }
    });

    // Wait for shutdown signal
    tokio::signal::ctrl_c().await?;
    info!("Shutting down");

    Ok(())
}
