//! Workload-controller derivations (replica-tracking kinds).

use super::identity_tags;
use crate::models::{KubernetesMetadata, MetadataEntries, MetricRecord, ResourceId};
use crate::objects::{
    DaemonSet, Deployment, ObjectMeta, ReplicaSet, ReplicationController, StatefulSet,
};

/// Desired/available gauge pair shared by the replica-based kinds. Desired
/// is omitted when the spec leaves it unset.
fn replica_metrics(
    kind_tag: &str,
    meta: &ObjectMeta,
    desired: Option<i64>,
    available: i64,
) -> Vec<MetricRecord> {
    let tags = identity_tags(kind_tag, meta);
    let mut records = Vec::with_capacity(2);
    if let Some(desired) = desired {
        records.push(MetricRecord::gauge(
            format!("k8s.{kind_tag}.desired"),
            desired as f64,
            tags.clone(),
        ));
    }
    records.push(MetricRecord::gauge(
        format!("k8s.{kind_tag}.available"),
        available as f64,
        tags,
    ));
    records
}

pub(super) fn metrics_for_replication_controller(
    rc: &ReplicationController,
) -> Vec<MetricRecord> {
    replica_metrics(
        "replicationcontroller",
        &rc.meta,
        rc.desired_replicas,
        rc.available_replicas,
    )
}

pub(super) fn metrics_for_deployment(deployment: &Deployment) -> Vec<MetricRecord> {
    replica_metrics(
        "deployment",
        &deployment.meta,
        deployment.desired_replicas,
        deployment.available_replicas,
    )
}

pub(super) fn metrics_for_replica_set(rs: &ReplicaSet) -> Vec<MetricRecord> {
    replica_metrics(
        "replicaset",
        &rs.meta,
        rs.desired_replicas,
        rs.available_replicas,
    )
}

pub(super) fn metrics_for_daemon_set(ds: &DaemonSet) -> Vec<MetricRecord> {
    let tags = identity_tags("daemonset", &ds.meta);
    vec![
        MetricRecord::gauge(
            "k8s.daemonset.current_scheduled_nodes",
            ds.current_scheduled_nodes as f64,
            tags.clone(),
        ),
        MetricRecord::gauge(
            "k8s.daemonset.desired_scheduled_nodes",
            ds.desired_scheduled_nodes as f64,
            tags.clone(),
        ),
        MetricRecord::gauge(
            "k8s.daemonset.misscheduled_nodes",
            ds.misscheduled_nodes as f64,
            tags.clone(),
        ),
        MetricRecord::gauge("k8s.daemonset.ready_nodes", ds.ready_nodes as f64, tags),
    ]
}

pub(super) fn metrics_for_stateful_set(ss: &StatefulSet) -> Vec<MetricRecord> {
    let tags = identity_tags("statefulset", &ss.meta);
    let mut records = Vec::with_capacity(4);
    if let Some(desired) = ss.desired_pods {
        records.push(MetricRecord::gauge(
            "k8s.statefulset.desired_pods",
            desired as f64,
            tags.clone(),
        ));
    }
    records.push(MetricRecord::gauge(
        "k8s.statefulset.ready_pods",
        ss.ready_pods as f64,
        tags.clone(),
    ));
    records.push(MetricRecord::gauge(
        "k8s.statefulset.current_pods",
        ss.current_pods as f64,
        tags.clone(),
    ));
    records.push(MetricRecord::gauge(
        "k8s.statefulset.updated_pods",
        ss.updated_pods as f64,
        tags,
    ));
    records
}

/// Single metadata entry shared by the controller kinds: the object's labels
/// plus its workload identity.
pub(super) fn workload_metadata(kind: &str, meta: &ObjectMeta) -> MetadataEntries {
    let id = match &meta.namespace {
        Some(namespace) => ResourceId::namespaced(kind, namespace.clone(), meta.name.clone()),
        None => ResourceId::cluster_scoped(kind, meta.name.clone()),
    };

    let mut metadata = KubernetesMetadata::default();
    metadata
        .properties
        .extend(meta.labels.iter().map(|(k, v)| (k.clone(), v.clone())));
    metadata
        .properties
        .insert("k8s.workload.kind".to_string(), kind.to_string());
    metadata
        .properties
        .insert("k8s.workload.name".to_string(), meta.name.clone());

    let mut entries = MetadataEntries::new();
    entries.insert(id, metadata);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_desired_replicas_is_omitted() {
        let rc = ReplicationController {
            meta: ObjectMeta {
                uid: "rc-uid".into(),
                name: "rc".into(),
                namespace: Some("default".into()),
                ..Default::default()
            },
            desired_replicas: None,
            available_replicas: 2,
        };

        let records = metrics_for_replication_controller(&rc);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "k8s.replicationcontroller.available");
    }

    #[test]
    fn test_workload_metadata_carries_labels_and_identity() {
        let meta = ObjectMeta {
            uid: "dep-uid".into(),
            name: "web".into(),
            namespace: Some("default".into()),
            labels: [("team".to_string(), "storage".to_string())].into(),
            ..Default::default()
        };

        let entries = workload_metadata("Deployment", &meta);
        let id = ResourceId::namespaced("Deployment", "default", "web");
        let metadata = &entries[&id];
        assert_eq!(metadata.properties["team"], "storage");
        assert_eq!(metadata.properties["k8s.workload.kind"], "Deployment");
    }
}
