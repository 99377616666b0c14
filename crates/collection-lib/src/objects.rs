//! Typed model of the cluster objects flowing through the collection pipeline.
//!
//! Every watch notification carries one `KubernetesObject`: a closed tagged
//! union over the supported resource kinds. Dispatch downstream is a pure
//! function of the variant tag, so adding a kind means adding a variant plus
//! its derivation functions and nothing else. The `Other` variant lets
//! objects of kinds this build does not understand flow through the pipeline
//! and degrade to empty derivations instead of crashing it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Group/version/kind triple identifying a watchable resource type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(
        group: impl Into<String>,
        version: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// Shorthand for the core API group (empty group string).
    pub fn core(version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::new("", version, kind)
    }
}

/// Kind-independent object metadata shared by every resource.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Unique ID assigned by the orchestration system for the object's
    /// lifetime. Empty when the upstream payload is malformed.
    #[serde(default)]
    pub uid: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub labels: BTreeMap<String, String>,
    #[serde(default)]
    pub owner_references: Vec<OwnerReference>,
}

/// Reference to the controller that owns an object (e.g. the ReplicaSet
/// behind a Pod).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OwnerReference {
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub uid: String,
}

/// Pod lifecycle phase as reported by the orchestration system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PodPhase {
    Pending,
    Running,
    Succeeded,
    Failed,
    #[default]
    Unknown,
}

impl PodPhase {
    /// Numeric encoding used by the pod phase metric.
    pub fn value(self) -> f64 {
        match self {
            PodPhase::Pending => 1.0,
            PodPhase::Running => 2.0,
            PodPhase::Succeeded => 3.0,
            PodPhase::Failed => 4.0,
            PodPhase::Unknown => 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamespacePhase {
    Active,
    Terminating,
}

impl NamespacePhase {
    pub fn value(self) -> f64 {
        match self {
            NamespacePhase::Active => 1.0,
            NamespacePhase::Terminating => 0.0,
        }
    }
}

/// Reported status of a node condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    pub fn value(self) -> f64 {
        match self {
            ConditionStatus::True => 1.0,
            ConditionStatus::False => 0.0,
            ConditionStatus::Unknown => -1.0,
        }
    }
}

/// Status of one container inside a pod.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContainerStatus {
    pub name: String,
    /// Runtime-prefixed ID, e.g. `docker://3a4b...`. Empty until the
    /// container has started.
    #[serde(default)]
    pub container_id: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub restart_count: i64,
    #[serde(default)]
    pub ready: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pod {
    pub meta: ObjectMeta,
    #[serde(default)]
    pub phase: PodPhase,
    /// Name of the node the pod is scheduled on, once assigned.
    #[serde(default)]
    pub node_name: Option<String>,
    #[serde(default)]
    pub containers: Vec<ContainerStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub meta: ObjectMeta,
    /// Condition name (e.g. `Ready`) to reported status.
    #[serde(default)]
    pub conditions: BTreeMap<String, ConditionStatus>,
    /// Allocatable resource name (e.g. `cpu`, `memory`) to quantity.
    #[serde(default)]
    pub allocatable: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Namespace {
    pub meta: ObjectMeta,
    pub phase: NamespacePhase,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationController {
    pub meta: ObjectMeta,
    #[serde(default)]
    pub desired_replicas: Option<i64>,
    #[serde(default)]
    pub available_replicas: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceQuota {
    pub meta: ObjectMeta,
    /// Hard limit per resource name.
    #[serde(default)]
    pub hard: BTreeMap<String, f64>,
    /// Observed usage per resource name.
    #[serde(default)]
    pub used: BTreeMap<String, f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub meta: ObjectMeta,
    #[serde(default)]
    pub desired_replicas: Option<i64>,
    #[serde(default)]
    pub available_replicas: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicaSet {
    pub meta: ObjectMeta,
    #[serde(default)]
    pub desired_replicas: Option<i64>,
    #[serde(default)]
    pub available_replicas: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DaemonSet {
    pub meta: ObjectMeta,
    #[serde(default)]
    pub current_scheduled_nodes: i64,
    #[serde(default)]
    pub desired_scheduled_nodes: i64,
    #[serde(default)]
    pub misscheduled_nodes: i64,
    #[serde(default)]
    pub ready_nodes: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatefulSet {
    pub meta: ObjectMeta,
    #[serde(default)]
    pub desired_pods: Option<i64>,
    #[serde(default)]
    pub ready_pods: i64,
    #[serde(default)]
    pub current_pods: i64,
    #[serde(default)]
    pub updated_pods: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub meta: ObjectMeta,
    #[serde(default)]
    pub active_pods: i64,
    #[serde(default)]
    pub failed_pods: i64,
    #[serde(default)]
    pub successful_pods: i64,
    #[serde(default)]
    pub desired_successful_pods: Option<i64>,
    #[serde(default)]
    pub max_parallel_pods: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CronJob {
    pub meta: ObjectMeta,
    #[serde(default)]
    pub schedule: String,
    #[serde(default)]
    pub concurrency_policy: String,
    #[serde(default)]
    pub active_jobs: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HorizontalPodAutoscaler {
    pub meta: ObjectMeta,
    /// Defaults to 1 when unset, matching the orchestration system.
    #[serde(default)]
    pub min_replicas: Option<i64>,
    #[serde(default)]
    pub max_replicas: i64,
    #[serde(default)]
    pub current_replicas: i64,
    #[serde(default)]
    pub desired_replicas: i64,
}

/// OpenShift cluster-scoped quota aggregated across namespaces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClusterResourceQuota {
    pub meta: ObjectMeta,
    #[serde(default)]
    pub hard: BTreeMap<String, f64>,
    #[serde(default)]
    pub used: BTreeMap<String, f64>,
}

/// An object of a kind this build does not derive anything from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnknownObject {
    pub kind: String,
    pub meta: ObjectMeta,
}

/// The closed union of resource kinds the pipeline understands.
///
/// The stable and beta CronJob schema revisions are distinct cases because
/// they arrive from distinct watch streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "object")]
pub enum KubernetesObject {
    Pod(Pod),
    Node(Node),
    Namespace(Namespace),
    ReplicationController(ReplicationController),
    ResourceQuota(ResourceQuota),
    Deployment(Deployment),
    ReplicaSet(ReplicaSet),
    DaemonSet(DaemonSet),
    StatefulSet(StatefulSet),
    Job(Job),
    CronJob(CronJob),
    CronJobBeta(CronJobBeta),
    HorizontalPodAutoscaler(HorizontalPodAutoscaler),
    ClusterResourceQuota(ClusterResourceQuota),
    Other(UnknownObject),
}

/// Beta-schema CronJob; same shape, separate watch stream and version tag.
pub type CronJobBeta = CronJob;

impl KubernetesObject {
    /// Kind label carried by the variant itself, used for diagnostics.
    /// No runtime type introspection is involved.
    pub fn kind_label(&self) -> &str {
        match self {
            KubernetesObject::Pod(_) => "Pod",
            KubernetesObject::Node(_) => "Node",
            KubernetesObject::Namespace(_) => "Namespace",
            KubernetesObject::ReplicationController(_) => "ReplicationController",
            KubernetesObject::ResourceQuota(_) => "ResourceQuota",
            KubernetesObject::Deployment(_) => "Deployment",
            KubernetesObject::ReplicaSet(_) => "ReplicaSet",
            KubernetesObject::DaemonSet(_) => "DaemonSet",
            KubernetesObject::StatefulSet(_) => "StatefulSet",
            KubernetesObject::Job(_) => "Job",
            KubernetesObject::CronJob(_) | KubernetesObject::CronJobBeta(_) => "CronJob",
            KubernetesObject::HorizontalPodAutoscaler(_) => "HorizontalPodAutoscaler",
            KubernetesObject::ClusterResourceQuota(_) => "ClusterResourceQuota",
            KubernetesObject::Other(o) => &o.kind,
        }
    }

    pub fn meta(&self) -> &ObjectMeta {
        match self {
            KubernetesObject::Pod(o) => &o.meta,
            KubernetesObject::Node(o) => &o.meta,
            KubernetesObject::Namespace(o) => &o.meta,
            KubernetesObject::ReplicationController(o) => &o.meta,
            KubernetesObject::ResourceQuota(o) => &o.meta,
            KubernetesObject::Deployment(o) => &o.meta,
            KubernetesObject::ReplicaSet(o) => &o.meta,
            KubernetesObject::DaemonSet(o) => &o.meta,
            KubernetesObject::StatefulSet(o) => &o.meta,
            KubernetesObject::Job(o) => &o.meta,
            KubernetesObject::CronJob(o) => &o.meta,
            KubernetesObject::CronJobBeta(o) => &o.meta,
            KubernetesObject::HorizontalPodAutoscaler(o) => &o.meta,
            KubernetesObject::ClusterResourceQuota(o) => &o.meta,
            KubernetesObject::Other(o) => &o.meta,
        }
    }

    /// The object's UID, or `None` when the payload carries no usable one.
    pub fn uid(&self) -> Option<&str> {
        let uid = self.meta().uid.as_str();
        if uid.is_empty() {
            None
        } else {
            Some(uid)
        }
    }

    pub fn gvk(&self) -> GroupVersionKind {
        match self {
            KubernetesObject::Pod(_)
            | KubernetesObject::Node(_)
            | KubernetesObject::Namespace(_)
            | KubernetesObject::ReplicationController(_)
            | KubernetesObject::ResourceQuota(_) => {
                GroupVersionKind::core("v1", self.kind_label())
            }
            KubernetesObject::Deployment(_)
            | KubernetesObject::ReplicaSet(_)
            | KubernetesObject::DaemonSet(_)
            | KubernetesObject::StatefulSet(_) => {
                GroupVersionKind::new("apps", "v1", self.kind_label())
            }
            KubernetesObject::Job(_) | KubernetesObject::CronJob(_) => {
                GroupVersionKind::new("batch", "v1", self.kind_label())
            }
            KubernetesObject::CronJobBeta(_) => {
                GroupVersionKind::new("batch", "v1beta1", "CronJob")
            }
            KubernetesObject::HorizontalPodAutoscaler(_) => {
                GroupVersionKind::new("autoscaling", "v2beta2", self.kind_label())
            }
            KubernetesObject::ClusterResourceQuota(_) => {
                GroupVersionKind::new("quota.openshift.io", "v1", self.kind_label())
            }
            KubernetesObject::Other(o) => GroupVersionKind::new("", "", o.kind.clone()),
        }
    }
}
