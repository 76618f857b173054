//! Emergency cleanup behaviour

use super::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyConfig {
    /// Let `monitor` run an emergency cleanup when the report is in error
    #[serde(default = "default_true")]
    pub auto_cleanup: bool,
    /// Flush the whole counter store; when false only known prefixes are evicted
    #[serde(default = "default_true")]
    pub cache_flush: bool,
    /// Evict `session_` entries when the store is not flushed
    #[serde(default = "default_true")]
    pub session_cleanup: bool,
}

impl Default for EmergencyConfig {
    fn default() -> Self {
        Self {
            auto_cleanup: true,
            cache_flush: true,
            session_cleanup: true,
        }
    }
}
