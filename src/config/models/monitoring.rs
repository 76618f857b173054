//! Monitoring configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Resource monitoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    /// Record a sample for every guarded operation
    #[serde(default = "default_true")]
    pub enable_resource_monitoring: bool,
    /// Log a warning for samples above `alert_threshold`
    #[serde(default = "default_true")]
    pub log_high_memory_usage: bool,
    /// Memory percent above which a sample counts as high memory
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold: f64,
    /// Hours of samples kept and reported
    #[serde(default = "default_retention_hours")]
    pub metrics_retention_hours: u32,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            enable_resource_monitoring: true,
            log_high_memory_usage: true,
            alert_threshold: default_alert_threshold(),
            metrics_retention_hours: default_retention_hours(),
        }
    }
}
