//! Caching and dispatch core of a cluster-state metrics receiver
//!
//! This crate provides the core functionality for:
//! - A concurrency-safe metrics cache keyed by resource identity
//! - Per-kind watch-cache indirection for metadata correlation
//! - Polymorphic derivation dispatch over the supported resource kinds
//! - The collector façade driven by watch events and the export timer

pub mod collector;
pub mod dispatch;
pub mod models;
pub mod objects;
pub mod store;
pub mod watch;

pub use collector::{Collector, CollectorConfig, DiagnosticsSink, StoreOp, TracingDiagnostics};
pub use models::*;
pub use objects::{GroupVersionKind, KubernetesObject, ObjectMeta};
pub use store::{IdentityResolutionError, MetadataStore, MetricsStore, ObjectCache};
pub use watch::WatchEvent;
