//! HorizontalPodAutoscaler derivations.

use super::identity_tags;
use super::workloads::workload_metadata;
use crate::models::{MetadataEntries, MetricRecord};
use crate::objects::HorizontalPodAutoscaler;

pub(super) fn metrics_for_hpa(hpa: &HorizontalPodAutoscaler) -> Vec<MetricRecord> {
    let tags = identity_tags("hpa", &hpa.meta);
    vec![
        MetricRecord::gauge("k8s.hpa.max_replicas", hpa.max_replicas as f64, tags.clone()),
        // unset minimum defaults to 1, matching the orchestration system
        MetricRecord::gauge(
            "k8s.hpa.min_replicas",
            hpa.min_replicas.unwrap_or(1) as f64,
            tags.clone(),
        ),
        MetricRecord::gauge(
            "k8s.hpa.current_replicas",
            hpa.current_replicas as f64,
            tags.clone(),
        ),
        MetricRecord::gauge(
            "k8s.hpa.desired_replicas",
            hpa.desired_replicas as f64,
            tags,
        ),
    ]
}

pub(super) fn metadata_for_hpa(hpa: &HorizontalPodAutoscaler) -> MetadataEntries {
    workload_metadata("HorizontalPodAutoscaler", &hpa.meta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::ObjectMeta;

    #[test]
    fn test_unset_min_replicas_defaults_to_one() {
        let hpa = HorizontalPodAutoscaler {
            meta: ObjectMeta {
                uid: "hpa-uid".into(),
                name: "web-hpa".into(),
                namespace: Some("default".into()),
                ..Default::default()
            },
            min_replicas: None,
            max_replicas: 10,
            current_replicas: 4,
            desired_replicas: 5,
        };

        let records = metrics_for_hpa(&hpa);
        let min = records
            .iter()
            .find(|r| r.name == "k8s.hpa.min_replicas")
            .unwrap();
        assert_eq!(min.value, 1.0);
    }
}
