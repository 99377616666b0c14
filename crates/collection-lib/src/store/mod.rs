//! Concurrency-safe stores backing the collector.
//!
//! The metrics store is the only mutable state this core owns. The metadata
//! store is pure indirection to caches owned by the watch subsystem.

mod metadata;
mod metrics;

pub use metadata::{MetadataStore, ObjectCache};
pub use metrics::{IdentityResolutionError, MetricsStore};
