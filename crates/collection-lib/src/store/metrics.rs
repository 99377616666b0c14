//! Cache of the most recently derived metric records per resource.

use crate::models::{MetricRecord, MetricsSnapshot, ResourceUid};
use crate::objects::KubernetesObject;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use thiserror::Error;

/// The object reaching the metrics cache carried no usable UID, so it cannot
/// be mapped to a stable identity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("object of kind {kind} has no usable uid")]
pub struct IdentityResolutionError {
    pub kind: String,
}

/// Concurrency-safe map from resource identity to the most recent metric
/// records derived for that resource.
///
/// Entries are replaced wholesale on update and leave the cache only through
/// an explicit `remove`. Writes to different identities proceed in parallel;
/// writes to the same identity serialize at the shard lock (last writer
/// wins).
pub struct MetricsStore {
    cache: DashMap<ResourceUid, Vec<MetricRecord>>,
}

impl MetricsStore {
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    fn resolve_identity(obj: &KubernetesObject) -> Result<ResourceUid, IdentityResolutionError> {
        obj.uid()
            .map(ResourceUid::new)
            .ok_or_else(|| IdentityResolutionError {
                kind: obj.kind_label().to_string(),
            })
    }

    /// Replaces the cached entry for the object's identity with `records`.
    ///
    /// An empty record set is deliberately not written: a transient empty
    /// derivation must not erase the last good entry. The cache only ever
    /// drops an entry through [`MetricsStore::remove`].
    pub fn update(
        &self,
        obj: &KubernetesObject,
        records: Vec<MetricRecord>,
    ) -> Result<(), IdentityResolutionError> {
        let uid = Self::resolve_identity(obj)?;
        if records.is_empty() {
            return Ok(());
        }
        self.cache.insert(uid, records);
        Ok(())
    }

    /// Drops the entry for the object's identity. Removing an absent entry
    /// is a no-op.
    pub fn remove(&self, obj: &KubernetesObject) -> Result<(), IdentityResolutionError> {
        let uid = Self::resolve_identity(obj)?;
        self.cache.remove(&uid);
        Ok(())
    }

    /// Consolidated read of every cached record, stamped with `collected_at`.
    ///
    /// Each entry is observed either before or after any concurrent write to
    /// it, never partially. The snapshot as a whole is not one atomic instant
    /// across entries; shard locks are held only long enough to clone one
    /// entry.
    pub fn snapshot(&self, collected_at: DateTime<Utc>) -> MetricsSnapshot {
        let mut records = Vec::new();
        for entry in self.cache.iter() {
            records.extend(entry.value().iter().cloned());
        }
        MetricsSnapshot {
            collected_at,
            records,
        }
    }

    /// Number of resources currently cached.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

impl Default for MetricsStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{ObjectMeta, Pod};
    use std::collections::BTreeMap;

    fn pod_with_uid(uid: &str) -> KubernetesObject {
        KubernetesObject::Pod(Pod {
            meta: ObjectMeta {
                uid: uid.into(),
                name: "test-pod".into(),
                namespace: Some("default".into()),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    fn records(name: &str, value: f64) -> Vec<MetricRecord> {
        vec![MetricRecord::gauge(name, value, BTreeMap::new())]
    }

    #[test]
    fn test_update_replaces_entry_wholesale() {
        let store = MetricsStore::new();
        let pod = pod_with_uid("uid-1");

        store.update(&pod, records("k8s.pod.phase", 1.0)).unwrap();
        store.update(&pod, records("k8s.pod.phase", 2.0)).unwrap();

        let snapshot = store.snapshot(Utc::now());
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].value, 2.0);
    }

    #[test]
    fn test_empty_update_preserves_last_good_entry() {
        let store = MetricsStore::new();
        let pod = pod_with_uid("uid-1");

        store.update(&pod, records("k8s.pod.phase", 2.0)).unwrap();
        store.update(&pod, Vec::new()).unwrap();

        let snapshot = store.snapshot(Utc::now());
        assert_eq!(snapshot.records.len(), 1);
        assert_eq!(snapshot.records[0].value, 2.0);
    }

    #[test]
    fn test_remove_drops_entry() {
        let store = MetricsStore::new();
        let pod = pod_with_uid("uid-1");

        store.update(&pod, records("k8s.pod.phase", 2.0)).unwrap();
        store.remove(&pod).unwrap();

        assert!(store.snapshot(Utc::now()).is_empty());
    }

    #[test]
    fn test_remove_absent_entry_is_noop() {
        let store = MetricsStore::new();
        let pod = pod_with_uid("uid-1");

        assert!(store.remove(&pod).is_ok());
        assert!(store.is_empty());
    }

    #[test]
    fn test_missing_uid_fails_identity_resolution() {
        let store = MetricsStore::new();
        let pod = KubernetesObject::Pod(Pod::default());

        let err = store
            .update(&pod, records("k8s.pod.phase", 1.0))
            .unwrap_err();
        assert_eq!(err.kind, "Pod");
        assert!(store.remove(&pod).is_err());
    }

    #[test]
    fn test_snapshot_is_stamped_with_supplied_timestamp() {
        let store = MetricsStore::new();
        let at = Utc::now();

        let snapshot = store.snapshot(at);
        assert_eq!(snapshot.collected_at, at);
        assert!(snapshot.is_empty());
    }
}
