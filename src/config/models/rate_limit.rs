//! Per-client admission limits

use super::*;
use serde::{Deserialize, Serialize};

/// Per-client concurrency and rate limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitingConfig {
    /// Maximum in-flight guarded operations per client
    #[serde(default = "default_concurrent_operations")]
    pub concurrent_operations: i64,
    /// Maximum external API operations per client per window
    #[serde(default = "default_firebase_operations")]
    pub firebase_operations: i64,
    /// Maximum import operations per client per window
    #[serde(default = "default_import_operations")]
    pub import_operations: i64,
    /// Rate window (counter TTL) in seconds
    #[serde(default = "default_rate_window_secs")]
    pub timeout: u64,
}

impl Default for RateLimitingConfig {
    fn default() -> Self {
        Self {
            concurrent_operations: default_concurrent_operations(),
            firebase_operations: default_firebase_operations(),
            import_operations: default_import_operations(),
            timeout: default_rate_window_secs(),
        }
    }
}
