//! Per-kind derivation dispatch.
//!
//! Dispatch is a pure function of the `KubernetesObject` variant tag: the
//! union is closed, so no two shapes can match one object and no tie-break
//! is needed. Metrics cover every supported kind; metadata covers the
//! narrower set (the quota kinds are metrics-only). Kinds this build does
//! not recognize yield empty results so new kinds degrade gracefully
//! instead of failing the pipeline.

mod autoscaling;
mod batch;
mod node;
mod pod;
mod quota;
mod workloads;

use crate::collector::CollectorConfig;
use crate::models::{MetadataEntries, MetricRecord};
use crate::objects::{KubernetesObject, ObjectMeta};
use crate::store::MetadataStore;
use std::collections::BTreeMap;

/// Derives the metric records for one object. Unrecognized kinds return an
/// empty set, never an error.
pub fn derive_metrics(obj: &KubernetesObject, config: &CollectorConfig) -> Vec<MetricRecord> {
    match obj {
        KubernetesObject::Pod(o) => pod::metrics_for_pod(o),
        KubernetesObject::Node(o) => node::metrics_for_node(o, config),
        KubernetesObject::Namespace(o) => node::metrics_for_namespace(o),
        KubernetesObject::ReplicationController(o) => {
            workloads::metrics_for_replication_controller(o)
        }
        KubernetesObject::ResourceQuota(o) => quota::metrics_for_resource_quota(o),
        KubernetesObject::Deployment(o) => workloads::metrics_for_deployment(o),
        KubernetesObject::ReplicaSet(o) => workloads::metrics_for_replica_set(o),
        KubernetesObject::DaemonSet(o) => workloads::metrics_for_daemon_set(o),
        KubernetesObject::StatefulSet(o) => workloads::metrics_for_stateful_set(o),
        KubernetesObject::Job(o) => batch::metrics_for_job(o),
        KubernetesObject::CronJob(o) => batch::metrics_for_cron_job(o),
        KubernetesObject::CronJobBeta(o) => batch::metrics_for_cron_job_beta(o),
        KubernetesObject::HorizontalPodAutoscaler(o) => autoscaling::metrics_for_hpa(o),
        KubernetesObject::ClusterResourceQuota(o) => {
            quota::metrics_for_cluster_resource_quota(o)
        }
        KubernetesObject::Other(_) => Vec::new(),
    }
}

/// Derives metadata entries for one object. A single object may describe
/// several entities (a Pod yields container entries as well). Kinds without
/// a metadata derivation return an empty mapping.
pub fn derive_metadata(obj: &KubernetesObject, store: &MetadataStore) -> MetadataEntries {
    match obj {
        KubernetesObject::Pod(o) => pod::metadata_for_pod(o, store),
        KubernetesObject::Node(o) => node::metadata_for_node(o),
        KubernetesObject::ReplicationController(o) => {
            workloads::workload_metadata("ReplicationController", &o.meta)
        }
        KubernetesObject::Deployment(o) => workloads::workload_metadata("Deployment", &o.meta),
        KubernetesObject::ReplicaSet(o) => workloads::workload_metadata("ReplicaSet", &o.meta),
        KubernetesObject::DaemonSet(o) => workloads::workload_metadata("DaemonSet", &o.meta),
        KubernetesObject::StatefulSet(o) => workloads::workload_metadata("StatefulSet", &o.meta),
        KubernetesObject::Job(o) => workloads::workload_metadata("Job", &o.meta),
        KubernetesObject::CronJob(o) => batch::metadata_for_cron_job(o),
        KubernetesObject::CronJobBeta(o) => batch::metadata_for_cron_job(o),
        KubernetesObject::HorizontalPodAutoscaler(o) => autoscaling::metadata_for_hpa(o),
        _ => MetadataEntries::new(),
    }
}

/// Resource-identity tags shared by every record derived from one object:
/// `k8s.<kind>.uid`, `k8s.<kind>.name` and, for namespaced objects,
/// `k8s.namespace.name`.
pub(crate) fn identity_tags(kind_tag: &str, meta: &ObjectMeta) -> BTreeMap<String, String> {
    let mut tags = BTreeMap::new();
    tags.insert(format!("k8s.{kind_tag}.uid"), meta.uid.clone());
    tags.insert(format!("k8s.{kind_tag}.name"), meta.name.clone());
    if let Some(namespace) = &meta.namespace {
        tags.insert("k8s.namespace.name".to_string(), namespace.clone());
    }
    tags
}
