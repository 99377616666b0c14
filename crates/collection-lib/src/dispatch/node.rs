//! Node and namespace derivations.

use super::identity_tags;
use crate::collector::CollectorConfig;
use crate::models::{KubernetesMetadata, MetadataEntries, MetricRecord, ResourceId};
use crate::objects::{ConditionStatus, Namespace, Node};

/// Conditions and allocatable quantities to report come from configuration;
/// a requested condition the node does not carry reports as unknown (-1).
pub(super) fn metrics_for_node(node: &Node, config: &CollectorConfig) -> Vec<MetricRecord> {
    let tags = identity_tags("node", &node.meta);
    let mut records = Vec::new();

    for condition in &config.node_conditions_to_report {
        let status = node
            .conditions
            .get(condition)
            .copied()
            .unwrap_or(ConditionStatus::Unknown);
        records.push(MetricRecord::gauge(
            format!("k8s.node.condition_{}", snake_case(condition)),
            status.value(),
            tags.clone(),
        ));
    }

    for allocatable in &config.allocatable_types_to_report {
        if let Some(quantity) = node.allocatable.get(allocatable) {
            records.push(MetricRecord::gauge(
                format!("k8s.node.allocatable_{}", snake_case(allocatable)),
                *quantity,
                tags.clone(),
            ));
        }
    }

    records
}

pub(super) fn metrics_for_namespace(namespace: &Namespace) -> Vec<MetricRecord> {
    vec![MetricRecord::gauge(
        "k8s.namespace.phase",
        namespace.phase.value(),
        identity_tags("namespace", &namespace.meta),
    )]
}

pub(super) fn metadata_for_node(node: &Node) -> MetadataEntries {
    let mut metadata = KubernetesMetadata::default();
    metadata
        .properties
        .extend(node.meta.labels.iter().map(|(k, v)| (k.clone(), v.clone())));
    metadata
        .properties
        .insert("k8s.node.uid".to_string(), node.meta.uid.clone());

    let mut entries = MetadataEntries::new();
    entries.insert(
        ResourceId::cluster_scoped("Node", node.meta.name.clone()),
        metadata,
    );
    entries
}

/// `Ready` -> `ready`, `MemoryPressure` -> `memory_pressure`.
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 2);
    for (i, c) in name.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::ObjectMeta;

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("Ready"), "ready");
        assert_eq!(snake_case("MemoryPressure"), "memory_pressure");
        assert_eq!(snake_case("cpu"), "cpu");
    }

    #[test]
    fn test_missing_condition_reports_unknown() {
        let node = Node {
            meta: ObjectMeta {
                uid: "node-uid".into(),
                name: "worker-1".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let config = CollectorConfig {
            node_conditions_to_report: vec!["Ready".into()],
            allocatable_types_to_report: vec!["cpu".into()],
        };

        let records = metrics_for_node(&node, &config);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "k8s.node.condition_ready");
        assert_eq!(records[0].value, -1.0);
    }

    #[test]
    fn test_allocatable_quantities_are_reported_when_present() {
        let node = Node {
            meta: ObjectMeta {
                uid: "node-uid".into(),
                name: "worker-1".into(),
                ..Default::default()
            },
            conditions: [("Ready".to_string(), ConditionStatus::True)].into(),
            allocatable: [("cpu".to_string(), 8.0), ("memory".to_string(), 3.2e10)].into(),
        };

        let records = metrics_for_node(&node, &CollectorConfig::default());
        assert!(records
            .iter()
            .any(|r| r.name == "k8s.node.condition_ready" && r.value == 1.0));
        assert!(records
            .iter()
            .any(|r| r.name == "k8s.node.allocatable_cpu" && r.value == 8.0));
        assert!(records
            .iter()
            .any(|r| r.name == "k8s.node.allocatable_memory"));
    }
}
