//! Cache key families and eviction behaviour

use serde::{Deserialize, Serialize};

/// How key patterns such as `validation_*` are evicted
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatternEviction {
    /// Delete every key starting with the pattern's prefix
    #[default]
    Prefix,
    /// Forget the pattern string itself as a single key.
    ///
    /// This matches deployments that relied on wildcard patterns being a no-op.
    Literal,
}

/// Cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub pattern_eviction: PatternEviction,
    /// Patterns evicted by admission when memory is above the emergency threshold
    #[serde(default = "default_pressure_patterns")]
    pub pressure_patterns: Vec<String>,
    /// Patterns evicted by `cleanup_old_entries` and `optimize`.
    ///
    /// Concurrency counters are owned by live permits and are never listed here.
    #[serde(default = "default_cleanup_patterns")]
    pub cleanup_patterns: Vec<String>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            pattern_eviction: PatternEviction::default(),
            pressure_patterns: default_pressure_patterns(),
            cleanup_patterns: default_cleanup_patterns(),
        }
    }
}

fn default_pressure_patterns() -> Vec<String> {
    ["external_operations_*", "import_operations_*", "validation_*", "vendor_user_*"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_cleanup_patterns() -> Vec<String> {
    [
        "external_operations_*",
        "validation_*",
        "resource_metrics_*",
    ]
    .iter()
    .map(|p| p.to_string())
    .collect()
}
