//! Indirection to the watch subsystem's per-kind object caches.
//!
//! Duplicating watch state here would create a second source of truth and a
//! staleness hazard, so this store holds only references. The caches are
//! owned and mutated exclusively by the watch subsystem; this side reads and
//! never writes.

use crate::objects::{GroupVersionKind, KubernetesObject};
use dashmap::DashMap;
use std::collections::HashMap;
use std::sync::Arc;

/// Read-only view over one kind's watch cache.
pub trait ObjectCache: Send + Sync {
    /// Looks up a previously observed object by its cache key.
    fn get(&self, key: &str) -> Option<KubernetesObject>;
}

/// Fixed snapshot cache, convenient for setup code and tests.
impl ObjectCache for HashMap<String, KubernetesObject> {
    fn get(&self, key: &str) -> Option<KubernetesObject> {
        HashMap::get(self, key).cloned()
    }
}

/// Per-kind registry of externally owned watch caches, consulted by
/// derivation functions that correlate an object against other kinds.
#[derive(Default)]
pub struct MetadataStore {
    caches: DashMap<GroupVersionKind, Arc<dyn ObjectCache>>,
}

impl MetadataStore {
    pub fn new() -> Self {
        Self {
            caches: DashMap::new(),
        }
    }

    /// Installs the cache reference for a kind. Idempotent: re-registering
    /// replaces the reference, which covers re-initialization after a watch
    /// reconnect.
    pub fn register_cache(&self, gvk: GroupVersionKind, cache: Arc<dyn ObjectCache>) {
        self.caches.insert(gvk, cache);
    }

    /// Previously observed object of `gvk` under `key`. `None` means no
    /// prior observation, either because the key is absent or because no
    /// cache is registered for the kind. Both are normal outcomes.
    pub fn lookup(&self, gvk: &GroupVersionKind, key: &str) -> Option<KubernetesObject> {
        self.caches.get(gvk).and_then(|cache| cache.get(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Node, ObjectMeta};

    fn node_cache(name: &str) -> Arc<dyn ObjectCache> {
        let mut cache = HashMap::new();
        cache.insert(
            name.to_string(),
            KubernetesObject::Node(Node {
                meta: ObjectMeta {
                    uid: "node-uid".into(),
                    name: name.into(),
                    ..Default::default()
                },
                ..Default::default()
            }),
        );
        Arc::new(cache)
    }

    #[test]
    fn test_lookup_without_registered_kind_is_not_found() {
        let store = MetadataStore::new();
        let gvk = GroupVersionKind::core("v1", "Node");

        assert!(store.lookup(&gvk, "worker-1").is_none());
    }

    #[test]
    fn test_lookup_finds_registered_object() {
        let store = MetadataStore::new();
        let gvk = GroupVersionKind::core("v1", "Node");
        store.register_cache(gvk.clone(), node_cache("worker-1"));

        let found = store.lookup(&gvk, "worker-1").unwrap();
        assert_eq!(found.meta().name, "worker-1");
        assert!(store.lookup(&gvk, "worker-2").is_none());
    }

    #[test]
    fn test_reregistering_a_kind_replaces_the_cache() {
        let store = MetadataStore::new();
        let gvk = GroupVersionKind::core("v1", "Node");

        store.register_cache(gvk.clone(), node_cache("worker-1"));
        store.register_cache(gvk.clone(), node_cache("worker-2"));

        assert!(store.lookup(&gvk, "worker-1").is_none());
        assert!(store.lookup(&gvk, "worker-2").is_some());
    }
}
