//! External document-store client settings
//!
//! These are consumed by the embedding application's sync layer; the guard
//! itself only enforces the per-client counter in `rate_limiting`.

use super::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FirebaseConfig {
    #[serde(default = "default_firebase_rate_limit")]
    pub rate_limit_per_minute: u32,
    /// Request timeout in seconds
    #[serde(default = "default_firebase_timeout")]
    pub timeout: u64,
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    #[serde(default = "default_firebase_batch_size")]
    pub batch_size: usize,
}

impl Default for FirebaseConfig {
    fn default() -> Self {
        Self {
            rate_limit_per_minute: default_firebase_rate_limit(),
            timeout: default_firebase_timeout(),
            retry_attempts: default_retry_attempts(),
            batch_size: default_firebase_batch_size(),
        }
    }
}
