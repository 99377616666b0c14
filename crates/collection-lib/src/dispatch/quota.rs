//! Quota derivations. Both quota kinds are metrics-only; they produce no
//! metadata entries.

use super::identity_tags;
use crate::models::MetricRecord;
use crate::objects::{ClusterResourceQuota, ResourceQuota};
use std::collections::BTreeMap;

fn quota_records(
    limit_name: &str,
    used_name: &str,
    base_tags: &BTreeMap<String, String>,
    hard: &BTreeMap<String, f64>,
    used: &BTreeMap<String, f64>,
) -> Vec<MetricRecord> {
    let mut records = Vec::with_capacity(hard.len() + used.len());
    for (resource, quantity) in hard {
        let mut tags = base_tags.clone();
        tags.insert("resource".to_string(), resource.clone());
        records.push(MetricRecord::gauge(limit_name, *quantity, tags));
    }
    for (resource, quantity) in used {
        let mut tags = base_tags.clone();
        tags.insert("resource".to_string(), resource.clone());
        records.push(MetricRecord::gauge(used_name, *quantity, tags));
    }
    records
}

pub(super) fn metrics_for_resource_quota(quota: &ResourceQuota) -> Vec<MetricRecord> {
    quota_records(
        "k8s.resource_quota.hard_limit",
        "k8s.resource_quota.used",
        &identity_tags("resource_quota", &quota.meta),
        &quota.hard,
        &quota.used,
    )
}

pub(super) fn metrics_for_cluster_resource_quota(
    quota: &ClusterResourceQuota,
) -> Vec<MetricRecord> {
    // OpenShift kind, reported under its own tag namespace
    let mut tags = BTreeMap::new();
    tags.insert(
        "openshift.clusterquota.uid".to_string(),
        quota.meta.uid.clone(),
    );
    tags.insert(
        "openshift.clusterquota.name".to_string(),
        quota.meta.name.clone(),
    );
    quota_records(
        "openshift.clusterquota.limit",
        "openshift.clusterquota.used",
        &tags,
        &quota.hard,
        &quota.used,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::ObjectMeta;

    #[test]
    fn test_quota_records_are_tagged_per_resource() {
        let quota = ResourceQuota {
            meta: ObjectMeta {
                uid: "rq-uid".into(),
                name: "compute".into(),
                namespace: Some("default".into()),
                ..Default::default()
            },
            hard: [("cpu".to_string(), 4.0), ("memory".to_string(), 8.0e9)].into(),
            used: [("cpu".to_string(), 1.5)].into(),
        };

        let records = metrics_for_resource_quota(&quota);
        assert_eq!(records.len(), 3);
        assert!(records.iter().any(|r| {
            r.name == "k8s.resource_quota.hard_limit" && r.tags["resource"] == "cpu"
        }));
        assert!(records
            .iter()
            .any(|r| r.name == "k8s.resource_quota.used" && r.value == 1.5));
    }

    #[test]
    fn test_cluster_quota_uses_openshift_tag_namespace() {
        let quota = ClusterResourceQuota {
            meta: ObjectMeta {
                uid: "crq-uid".into(),
                name: "org-quota".into(),
                ..Default::default()
            },
            hard: [("pods".to_string(), 100.0)].into(),
            used: BTreeMap::new(),
        };

        let records = metrics_for_cluster_resource_quota(&quota);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "openshift.clusterquota.limit");
        assert_eq!(records[0].tags["openshift.clusterquota.uid"], "crq-uid");
    }
}
