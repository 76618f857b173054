//! Memory pressure housekeeping

use crate::config::{CacheConfig, MemoryConfig};
use crate::monitoring::memory::MemorySource;
use crate::storage::counter::{CounterStore, evict_pattern};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PressureLevel {
    Normal,
    /// Above `max_usage_percent`: reclaim
    Elevated,
    /// Above `emergency_cleanup_threshold`: reclaim and evict caches
    Critical,
}

pub fn classify_pressure(percent: f64, config: &MemoryConfig) -> PressureLevel {
    if percent > config.emergency_cleanup_threshold {
        PressureLevel::Critical
    } else if percent > config.max_usage_percent {
        PressureLevel::Elevated
    } else {
        PressureLevel::Normal
    }
}

/// Reclaim and evict according to current pressure.
///
/// Eviction failures are logged and swallowed; this never blocks admission.
pub async fn relieve(
    memory: &dyn MemorySource,
    store: &dyn CounterStore,
    memory_config: &MemoryConfig,
    cache: &CacheConfig,
) -> PressureLevel {
    let percent = memory.snapshot().percent();
    let level = classify_pressure(percent, memory_config);
    if level == PressureLevel::Normal {
        return level;
    }

    warn!(memory_percent = percent, ?level, "High memory usage before guarded operation");
    memory.reclaim();

    if level == PressureLevel::Critical {
        let mut removed = 0;
        for pattern in &cache.pressure_patterns {
            match evict_pattern(store, pattern, cache.pattern_eviction).await {
                Ok(count) => removed += count,
                Err(e) => warn!(pattern = %pattern, error = %e, "Pressure eviction failed"),
            }
        }
        info!(removed, "Evicted caches under memory pressure");
    }
    level
}
