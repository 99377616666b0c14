//! Pod derivations: phase and per-container metrics, plus metadata entries
//! for the pod and each of its containers.

use super::identity_tags;
use crate::models::{KubernetesMetadata, MetadataEntries, MetricRecord, ResourceId};
use crate::objects::{GroupVersionKind, Pod};
use crate::store::MetadataStore;
use tracing::debug;

pub(super) fn metrics_for_pod(pod: &Pod) -> Vec<MetricRecord> {
    let pod_tags = identity_tags("pod", &pod.meta);
    let mut records = vec![MetricRecord::gauge(
        "k8s.pod.phase",
        pod.phase.value(),
        pod_tags.clone(),
    )];

    for container in &pod.containers {
        let mut tags = pod_tags.clone();
        tags.insert("k8s.container.name".to_string(), container.name.clone());
        if let Some(id) = container_id(&container.container_id) {
            tags.insert("container.id".to_string(), id.to_string());
        }

        records.push(MetricRecord::gauge(
            "k8s.container.restarts",
            container.restart_count as f64,
            tags.clone(),
        ));
        records.push(MetricRecord::gauge(
            "k8s.container.ready",
            if container.ready { 1.0 } else { 0.0 },
            tags,
        ));
    }

    records
}

/// Pod metadata plus one entry per started container. The node relationship
/// is resolved against the Node watch cache; a miss just means the node has
/// not been observed yet.
pub(super) fn metadata_for_pod(pod: &Pod, store: &MetadataStore) -> MetadataEntries {
    let namespace = pod.meta.namespace.clone().unwrap_or_default();
    let pod_id = ResourceId::namespaced("Pod", namespace, pod.meta.name.clone());

    let mut pod_metadata = KubernetesMetadata::default();
    pod_metadata.properties.extend(
        pod.meta
            .labels
            .iter()
            .map(|(k, v)| (k.clone(), v.clone())),
    );
    if let Some(owner) = pod.meta.owner_references.first() {
        pod_metadata
            .properties
            .insert("k8s.workload.kind".to_string(), owner.kind.clone());
        pod_metadata
            .properties
            .insert("k8s.workload.name".to_string(), owner.name.clone());
    }

    if let Some(node_name) = &pod.node_name {
        let node_gvk = GroupVersionKind::core("v1", "Node");
        match store.lookup(&node_gvk, node_name) {
            Some(node) => {
                pod_metadata.relationships.insert(
                    "k8s.node".to_string(),
                    ResourceId::cluster_scoped("Node", node.meta().name.clone()),
                );
            }
            None => debug!(
                pod = %pod.meta.name,
                node = %node_name,
                "node not observed yet, omitting node relationship"
            ),
        }
    }

    let mut entries = MetadataEntries::new();
    for container in &pod.containers {
        let Some(id) = container_id(&container.container_id) else {
            continue;
        };
        let mut metadata = KubernetesMetadata::default();
        metadata
            .properties
            .insert("container.id".to_string(), id.to_string());
        metadata
            .properties
            .insert("k8s.container.name".to_string(), container.name.clone());
        if !container.image.is_empty() {
            metadata
                .properties
                .insert("container.image.name".to_string(), container.image.clone());
        }
        metadata
            .relationships
            .insert("k8s.pod".to_string(), pod_id.clone());
        entries.insert(ResourceId::cluster_scoped("Container", id), metadata);
    }

    entries.insert(pod_id, pod_metadata);
    entries
}

/// Strips the runtime scheme from a reported container ID
/// (`docker://3a4b...` yields `3a4b...`). Empty until the container starts.
fn container_id(reported: &str) -> Option<&str> {
    if reported.is_empty() {
        return None;
    }
    Some(
        reported
            .split_once("://")
            .map(|(_, id)| id)
            .unwrap_or(reported),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_id_strips_runtime_scheme() {
        assert_eq!(container_id("docker://abc123"), Some("abc123"));
        assert_eq!(container_id("containerd://def"), Some("def"));
        assert_eq!(container_id("bare-id"), Some("bare-id"));
        assert_eq!(container_id(""), None);
    }
}
