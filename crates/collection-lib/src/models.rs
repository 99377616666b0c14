//! Derived record types produced by the collection pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Metrics-domain identity of a cluster object: its UID, stable for the
/// object's lifetime and used as the metrics-cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceUid(String);

impl ResourceUid {
    pub fn new(uid: impl Into<String>) -> Self {
        Self(uid.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single derived measurement with its resource-identity tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRecord {
    pub name: String,
    pub value: f64,
    pub tags: BTreeMap<String, String>,
}

impl MetricRecord {
    pub fn gauge(name: impl Into<String>, value: f64, tags: BTreeMap<String, String>) -> Self {
        Self {
            name: name.into(),
            value,
            tags,
        }
    }
}

/// Point-in-time consolidated read of every cached metric record, stamped
/// with the collection timestamp it was taken at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub collected_at: DateTime<Utc>,
    pub records: Vec<MetricRecord>,
}

impl MetricsSnapshot {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Metadata-domain identity. Unlike the raw UID used by the metrics cache,
/// entities here are addressable by kind, namespace and name so that
/// relationships (e.g. the Node a Pod runs on) can reference each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId {
    pub kind: String,
    pub namespace: Option<String>,
    pub name: String,
}

impl ResourceId {
    pub fn namespaced(
        kind: impl Into<String>,
        namespace: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            kind: kind.into(),
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    pub fn cluster_scoped(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            namespace: None,
            name: name.into(),
        }
    }
}

/// Key/value properties plus named relationships describing one entity at
/// one point in time. Produced fresh on every metadata sync and handed back
/// to the caller; the core never caches derived metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KubernetesMetadata {
    pub properties: BTreeMap<String, String>,
    /// Relationship name (e.g. `k8s.node`) to the entity it points at.
    pub relationships: BTreeMap<String, ResourceId>,
}

/// One metadata sync may describe several entities (a Pod yields its own
/// entry plus one per container).
pub type MetadataEntries = HashMap<ResourceId, KubernetesMetadata>;
