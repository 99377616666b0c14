//! The collection façade composing the stores and the dispatcher.
//!
//! Multiple watch sources call the sync/remove paths concurrently while the
//! export timer calls `collect`; every operation is synchronous, in-memory
//! and bounded. Write-path failures are reported to the diagnostics sink and
//! swallowed so a single malformed event never interrupts the stream.


use crate::dispatch;
use crate::models::{MetadataEntries, MetricsSnapshot};
use crate::objects::{GroupVersionKind, KubernetesObject};
use crate::store::{IdentityResolutionError, MetadataStore, MetricsStore, ObjectCache};
use crate::watch::WatchEvent;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::error;

/// Knobs feeding the node derivation.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Node conditions to report, e.g. `Ready`, `MemoryPressure`.
    pub node_conditions_to_report: Vec<String>,
    /// Allocatable resource types to report, e.g. `cpu`, `memory`.
    pub allocatable_types_to_report: Vec<String>,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            node_conditions_to_report: vec!["Ready".to_string()],
            allocatable_types_to_report: vec!["cpu".to_string(), "memory".to_string()],
        }
    }
}

/// Which metrics-cache write failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Update,
    Remove,
}

impl StoreOp {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreOp::Update => "update",
            StoreOp::Remove => "remove",
        }
    }
}

/// Explicit diagnostics dependency instead of a global logger, so tests can
/// assert on emitted diagnostics.
pub trait DiagnosticsSink: Send + Sync {
    fn store_failure(&self, op: StoreOp, kind: &str, error: &IdentityResolutionError);
}

/// Default sink forwarding to `tracing`.
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn store_failure(&self, op: StoreOp, kind: &str, error: &IdentityResolutionError) {
        error!(
            op = op.as_str(),
            kind = %kind,
            error = %error,
            "failed to write metric cache"
        );
    }
}

/// Façade over the metrics store, the metadata store and the dispatcher.
pub struct Collector {
    config: CollectorConfig,
    diagnostics: Arc<dyn DiagnosticsSink>,
    metrics_store: MetricsStore,
    metadata_store: MetadataStore,
}

impl Collector {
    pub fn new(config: CollectorConfig) -> Self {
        Self::with_diagnostics(config, Arc::new(TracingDiagnostics))
    }

    pub fn with_diagnostics(config: CollectorConfig, diagnostics: Arc<dyn DiagnosticsSink>) -> Self {
        Self {
            config,
            diagnostics,
            metrics_store: MetricsStore::new(),
            metadata_store: MetadataStore::new(),
        }
    }

    /// Installs the watch cache for a kind, called once per kind during
    /// pipeline setup. Passthrough to the metadata store.
    pub fn register_kind_cache(&self, gvk: GroupVersionKind, cache: Arc<dyn ObjectCache>) {
        self.metadata_store.register_cache(gvk, cache);
    }

    pub fn metadata_store(&self) -> &MetadataStore {
        &self.metadata_store
    }

    /// Derives and caches metrics for a changed object. An empty derivation
    /// leaves the cache untouched; a write failure is reported and swallowed.
    pub fn sync_metrics(&self, obj: &KubernetesObject) {
        let records = dispatch::derive_metrics(obj, &self.config);
        if records.is_empty() {
            return;
        }
        if let Err(err) = self.metrics_store.update(obj, records) {
            self.diagnostics
                .store_failure(StoreOp::Update, obj.kind_label(), &err);
        }
    }

    /// Drops the cached metrics for a deleted object.
    pub fn remove_metrics(&self, obj: &KubernetesObject) {
        if let Err(err) = self.metrics_store.remove(obj) {
            self.diagnostics
                .store_failure(StoreOp::Remove, obj.kind_label(), &err);
        }
    }

    /// Derives metadata entries for a changed object and hands them back to
    /// the caller. The surrounding pipeline forwards them to its metadata
    /// sink; nothing is persisted here.
    pub fn sync_metadata(&self, obj: &KubernetesObject) -> MetadataEntries {
        dispatch::derive_metadata(obj, &self.metadata_store)
    }

    /// Consolidated snapshot of every cached metric record. The sole read
    /// path, driven by the periodic export timer.
    pub fn collect(&self, collected_at: DateTime<Utc>) -> MetricsSnapshot {
        self.metrics_store.snapshot(collected_at)
    }

    /// Applies one watch notification to the metrics cache.
    pub fn apply(&self, event: &WatchEvent) {
        match event {
            WatchEvent::Added(obj) | WatchEvent::Updated(obj) => self.sync_metrics(obj),
            WatchEvent::Deleted(obj) => self.remove_metrics(obj),
        }
    }
}
