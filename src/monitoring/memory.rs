//! Process memory source
//!
//! Usage and peak come from the operating system via `sysinfo` when the
//! `metrics` feature is enabled. The limit is either configured, detected
//! from cgroups, or falls back to total system memory. Admission tuning may
//! lower the limit with an effective ceiling.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "metrics")]
use sysinfo::{Pid, ProcessesToUpdate, System};

/// Point-in-time memory reading, in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub usage: u64,
    pub peak: u64,
    pub limit: u64,
}

impl MemorySnapshot {
    /// Usage as a percentage of the limit; 0 when the limit is unknown
    pub fn percent(&self) -> f64 {
        if self.limit == 0 {
            0.0
        } else {
            self.usage as f64 / self.limit as f64 * 100.0
        }
    }
}

pub trait MemorySource: Send + Sync + std::fmt::Debug {
    fn snapshot(&self) -> MemorySnapshot;

    /// Limit before any ceiling is applied
    fn base_limit(&self) -> u64;

    /// Cap the reported limit at `ceiling` bytes
    fn apply_ceiling(&self, ceiling: u64);

    /// Release cached state held by the source
    fn reclaim(&self);
}

fn effective_limit(base: u64, ceiling: u64) -> u64 {
    if ceiling == 0 { base } else { ceiling }
}

/// Memory of the current process
#[derive(Debug)]
pub struct ProcessMemory {
    base_limit: u64,
    ceiling: AtomicU64,
    peak: AtomicU64,
    #[cfg(feature = "metrics")]
    pid: Option<Pid>,
    #[cfg(feature = "metrics")]
    system: parking_lot::Mutex<System>,
}

impl ProcessMemory {
    /// `limit_mb` overrides detection when set
    pub fn new(limit_mb: Option<u64>) -> Self {
        let detected = limit_mb.map(|mb| mb * 1024 * 1024);

        #[cfg(feature = "metrics")]
        {
            let mut system = System::new();
            let base_limit = detected.unwrap_or_else(|| {
                system.refresh_memory();
                system
                    .cgroup_limits()
                    .map(|c| c.total_memory)
                    .filter(|total| *total > 0)
                    .unwrap_or_else(|| system.total_memory())
            });
            Self {
                base_limit,
                ceiling: AtomicU64::new(0),
                peak: AtomicU64::new(0),
                pid: sysinfo::get_current_pid().ok(),
                system: parking_lot::Mutex::new(system),
            }
        }

        #[cfg(not(feature = "metrics"))]
        {
            Self {
                base_limit: detected.unwrap_or(0),
                ceiling: AtomicU64::new(0),
                peak: AtomicU64::new(0),
            }
        }
    }

    #[cfg(feature = "metrics")]
    fn current_usage(&self) -> u64 {
        let Some(pid) = self.pid else {
            return 0;
        };
        let mut system = self.system.lock();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        system.process(pid).map(|p| p.memory()).unwrap_or(0)
    }

    #[cfg(not(feature = "metrics"))]
    fn current_usage(&self) -> u64 {
        0
    }
}

impl MemorySource for ProcessMemory {
    fn snapshot(&self) -> MemorySnapshot {
        let usage = self.current_usage();
        let peak = self.peak.fetch_max(usage, Ordering::Relaxed).max(usage);
        MemorySnapshot {
            usage,
            peak,
            limit: effective_limit(self.base_limit, self.ceiling.load(Ordering::Relaxed)),
        }
    }

    fn base_limit(&self) -> u64 {
        self.base_limit
    }

    fn apply_ceiling(&self, ceiling: u64) {
        self.ceiling.store(ceiling, Ordering::Relaxed);
    }

    #[cfg(feature = "metrics")]
    fn reclaim(&self) {
        *self.system.lock() = System::new();
    }

    #[cfg(not(feature = "metrics"))]
    fn reclaim(&self) {}
}

/// Fixed readings, settable at runtime
#[derive(Debug, Default)]
pub struct StaticMemory {
    usage: AtomicU64,
    peak: AtomicU64,
    base_limit: u64,
    ceiling: AtomicU64,
    reclaims: AtomicU64,
}

impl StaticMemory {
    pub fn new(usage: u64, limit: u64) -> Self {
        Self {
            usage: AtomicU64::new(usage),
            peak: AtomicU64::new(usage),
            base_limit: limit,
            ..Default::default()
        }
    }

    /// Convenience constructor taking megabytes
    pub fn mb(usage_mb: u64, limit_mb: u64) -> Self {
        Self::new(usage_mb * 1024 * 1024, limit_mb * 1024 * 1024)
    }

    pub fn set_usage(&self, usage: u64) {
        self.usage.store(usage, Ordering::Relaxed);
        self.peak.fetch_max(usage, Ordering::Relaxed);
    }

    /// Number of times `reclaim` was called
    pub fn reclaim_count(&self) -> u64 {
        self.reclaims.load(Ordering::Relaxed)
    }
}

impl MemorySource for StaticMemory {
    fn snapshot(&self) -> MemorySnapshot {
        MemorySnapshot {
            usage: self.usage.load(Ordering::Relaxed),
            peak: self.peak.load(Ordering::Relaxed),
            limit: effective_limit(self.base_limit, self.ceiling.load(Ordering::Relaxed)),
        }
    }

    fn base_limit(&self) -> u64 {
        self.base_limit
    }

    fn apply_ceiling(&self, ceiling: u64) {
        self.ceiling.store(ceiling, Ordering::Relaxed);
    }

    fn reclaim(&self) {
        self.reclaims.fetch_add(1, Ordering::Relaxed);
    }
}
