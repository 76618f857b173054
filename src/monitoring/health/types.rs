//! Health report types

use crate::monitoring::reporter::ResourceStats;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Check severity, ordered `Ok < Warning < Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Ok,
    Warning,
    Error,
}

impl Status {
    /// Worst status of `statuses`; `Ok` when empty
    pub fn worst<I: IntoIterator<Item = Status>>(statuses: I) -> Status {
        statuses.into_iter().max().unwrap_or(Status::Ok)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Ok => "ok",
            Status::Warning => "warning",
            Status::Error => "error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numeric detail attached to a check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheckDetail {
    Memory {
        usage: u64,
        peak: u64,
        limit: u64,
        percent: f64,
    },
    Counter {
        current: i64,
        max: i64,
    },
    Latency {
        duration_ms: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckResult {
    pub name: String,
    pub status: Status,
    pub message: String,
    /// Absent when the check itself failed
    #[serde(flatten, default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<CheckDetail>,
}

impl CheckResult {
    pub fn new(name: &str, status: Status, message: String, detail: CheckDetail) -> Self {
        Self {
            name: name.to_string(),
            status,
            message,
            detail: Some(detail),
        }
    }

    pub fn failed(name: &str, message: String) -> Self {
        Self {
            name: name.to_string(),
            status: Status::Error,
            message,
            detail: None,
        }
    }
}

/// Aggregated health snapshot; built fresh for every request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusReport {
    pub timestamp: DateTime<Utc>,
    pub status: Status,
    pub checks: BTreeMap<String, CheckResult>,
    pub statistics: ResourceStats,
}

impl StatusReport {
    pub fn new(checks: Vec<CheckResult>, statistics: ResourceStats) -> Self {
        let status = Status::worst(checks.iter().map(|c| c.status));
        Self {
            timestamp: Utc::now(),
            status,
            checks: checks.into_iter().map(|c| (c.name.clone(), c)).collect(),
            statistics,
        }
    }

    /// Checks with exactly `status`, in name order
    pub fn checks_with(&self, status: Status) -> impl Iterator<Item = &CheckResult> {
        self.checks.values().filter(move |c| c.status == status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CleanupStatus {
    Success,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleanupOutcome {
    pub status: CleanupStatus,
    pub message: String,
    pub memory_usage_before: u64,
    pub memory_usage_after: u64,
}

impl CleanupOutcome {
    pub fn is_success(&self) -> bool {
        self.status == CleanupStatus::Success
    }
}
