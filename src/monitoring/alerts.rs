//! Structured alert records
//!
//! Alerts are log events only. Whatever ships logs decides who gets paged.

use super::health::{Status, StatusReport};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    Warning,
    Critical,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResourceAlert {
    pub severity: AlertSeverity,
    /// Names of the checks at the report's status
    pub checks: Vec<String>,
    pub messages: Vec<String>,
    pub total_operations: u64,
    pub high_memory_operations: u64,
}

impl ResourceAlert {
    /// Build an alert for a degraded report; `None` when everything is ok
    pub fn from_report(report: &StatusReport) -> Option<Self> {
        let severity = match report.status {
            Status::Ok => return None,
            Status::Warning => AlertSeverity::Warning,
            Status::Error => AlertSeverity::Critical,
        };
        let (checks, messages) = report
            .checks_with(report.status)
            .map(|c| (c.name.clone(), c.message.clone()))
            .unzip();

        Some(Self {
            severity,
            checks,
            messages,
            total_operations: report.statistics.total_operations,
            high_memory_operations: report.statistics.high_memory_operations,
        })
    }

    /// Emit as a single structured log event
    pub fn emit(&self) {
        let checks = self.checks.join(",");
        let messages = self.messages.join("; ");
        match self.severity {
            AlertSeverity::Critical => error!(
                alert = "resource_critical",
                checks = %checks,
                messages = %messages,
                total_operations = self.total_operations,
                high_memory_operations = self.high_memory_operations,
                "CRITICAL: resource usage alert"
            ),
            AlertSeverity::Warning => warn!(
                alert = "resource_warning",
                checks = %checks,
                messages = %messages,
                total_operations = self.total_operations,
                high_memory_operations = self.high_memory_operations,
                "WARNING: resource usage alert"
            ),
        }
    }
}
