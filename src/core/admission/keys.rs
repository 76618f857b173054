//! Counter keys scoped by client identity

use crate::config::RateLimitingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const CONCURRENCY_PREFIX: &str = "concurrent_operations_";

pub fn concurrency_key(identity: &str) -> String {
    format!("{CONCURRENCY_PREFIX}{identity}")
}

/// Rate-limited operation families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Calls to the external document store
    ExternalApi,
    /// Bulk imports
    Import,
}

impl OperationKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            OperationKind::ExternalApi => "external_operations_",
            OperationKind::Import => "import_operations_",
        }
    }

    pub fn key(&self, identity: &str) -> String {
        format!("{}{}", self.prefix(), identity)
    }

    /// Per-window maximum for this kind
    pub fn max(&self, config: &RateLimitingConfig) -> i64 {
        match self {
            OperationKind::ExternalApi => config.firebase_operations,
            OperationKind::Import => config.import_operations,
        }
    }

    /// Machine-readable rejection reason
    pub fn reason(&self) -> &'static str {
        match self {
            OperationKind::ExternalApi => "too_many_external_operations",
            OperationKind::Import => "too_many_import_operations",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OperationKind::ExternalApi => f.write_str("external API"),
            OperationKind::Import => f.write_str("import"),
        }
    }
}
