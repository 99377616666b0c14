//! Receiver configuration

use anyhow::Result;
use serde::Deserialize;

/// Receiver configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiverConfig {
    /// API server port for health/snapshot/event endpoints
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Snapshot export interval in seconds
    #[serde(default = "default_export_interval")]
    pub export_interval_secs: u64,

    /// Node conditions to report on node metrics
    #[serde(default = "default_node_conditions")]
    pub node_conditions_to_report: Vec<String>,

    /// Allocatable resource types to report on node metrics
    #[serde(default = "default_allocatable_types")]
    pub allocatable_types_to_report: Vec<String>,
}

fn default_api_port() -> u16 {
    8080
}

fn default_export_interval() -> u64 {
    30
}

fn default_node_conditions() -> Vec<String> {
    vec!["Ready".to_string()]
}

fn default_allocatable_types() -> Vec<String> {
    vec!["cpu".to_string(), "memory".to_string()]
}

impl ReceiverConfig {
    /// Load configuration from environment
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("RECEIVER"))
            .build()?;

        Ok(config.try_deserialize().unwrap_or_else(|_| ReceiverConfig {
            api_port: default_api_port(),
            export_interval_secs: default_export_interval(),
            node_conditions_to_report: default_node_conditions(),
            allocatable_types_to_report: default_allocatable_types(),
        }))
    }
}
