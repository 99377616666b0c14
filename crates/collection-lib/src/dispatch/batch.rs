//! Job and CronJob derivations. The beta CronJob schema shares the stable
//! derivation; only its watch stream and version tag differ.

use super::identity_tags;
use super::workloads::workload_metadata;
use crate::models::{MetadataEntries, MetricRecord};
use crate::objects::{CronJob, Job};

pub(super) fn metrics_for_job(job: &Job) -> Vec<MetricRecord> {
    let tags = identity_tags("job", &job.meta);
    let mut records = vec![
        MetricRecord::gauge("k8s.job.active_pods", job.active_pods as f64, tags.clone()),
        MetricRecord::gauge("k8s.job.failed_pods", job.failed_pods as f64, tags.clone()),
        MetricRecord::gauge(
            "k8s.job.successful_pods",
            job.successful_pods as f64,
            tags.clone(),
        ),
    ];
    if let Some(completions) = job.desired_successful_pods {
        records.push(MetricRecord::gauge(
            "k8s.job.desired_successful_pods",
            completions as f64,
            tags.clone(),
        ));
    }
    if let Some(parallelism) = job.max_parallel_pods {
        records.push(MetricRecord::gauge(
            "k8s.job.max_parallel_pods",
            parallelism as f64,
            tags,
        ));
    }
    records
}

pub(super) fn metrics_for_cron_job(cron_job: &CronJob) -> Vec<MetricRecord> {
    vec![MetricRecord::gauge(
        "k8s.cronjob.active_jobs",
        cron_job.active_jobs as f64,
        identity_tags("cronjob", &cron_job.meta),
    )]
}

pub(super) fn metrics_for_cron_job_beta(cron_job: &CronJob) -> Vec<MetricRecord> {
    metrics_for_cron_job(cron_job)
}

pub(super) fn metadata_for_cron_job(cron_job: &CronJob) -> MetadataEntries {
    let mut entries = workload_metadata("CronJob", &cron_job.meta);
    for metadata in entries.values_mut() {
        metadata
            .properties
            .insert("schedule".to_string(), cron_job.schedule.clone());
        metadata.properties.insert(
            "concurrency_policy".to_string(),
            cron_job.concurrency_policy.clone(),
        );
    }
    entries
}
