//! Memory management thresholds

use super::*;
use serde::{Deserialize, Serialize};

/// Memory thresholds, in percent of the effective memory limit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    /// Above this the memory check warns and admission reclaims
    #[serde(default = "default_max_usage_percent")]
    pub max_usage_percent: f64,
    /// Above this the memory check errors and admission evicts caches
    #[serde(default = "default_emergency_cleanup_threshold")]
    pub emergency_cleanup_threshold: f64,
    /// Row chunk size for bulk work done by embedding applications
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Upper bound of the effective memory ceiling, in MB
    #[serde(default = "default_max_memory_limit_mb")]
    pub max_memory_limit_mb: u64,
    /// Process memory limit in MB; detected from cgroups or system memory when unset
    #[serde(default)]
    pub process_limit_mb: Option<u64>,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            max_usage_percent: default_max_usage_percent(),
            emergency_cleanup_threshold: default_emergency_cleanup_threshold(),
            chunk_size: default_chunk_size(),
            max_memory_limit_mb: default_max_memory_limit_mb(),
            process_limit_mb: None,
        }
    }
}

impl MemoryConfig {
    /// Ceiling bound in bytes
    pub fn max_memory_limit_bytes(&self) -> u64 {
        self.max_memory_limit_mb * 1024 * 1024
    }
}
