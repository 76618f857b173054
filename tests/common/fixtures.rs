//! Test fixtures
//!
//! Every fixture wires real components over in-memory backends: a settable
//! memory source, a DashMap counter store and a static database probe.

use resource_guard::config::GuardConfig;
use resource_guard::monitoring::StaticMemory;
use resource_guard::server::AppState;
use resource_guard::storage::{MemoryCounterStore, StaticProbe};
use std::sync::Arc;
use std::time::Duration;

pub const MB: u64 = 1024 * 1024;

/// Builder for an `AppState` over test backends
#[derive(Debug)]
pub struct GuardFixture {
    pub config: GuardConfig,
    pub memory: Arc<StaticMemory>,
    pub store: Arc<MemoryCounterStore>,
    pub probe: Arc<StaticProbe>,
}

impl Default for GuardFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl GuardFixture {
    /// 10 MB used of 1 GB, healthy database, empty store.
    ///
    /// The state applies the default 128 MB ceiling, so memory reads as 7.81%.
    pub fn new() -> Self {
        Self {
            config: GuardConfig::default(),
            memory: Arc::new(StaticMemory::mb(10, 1024)),
            store: Arc::new(MemoryCounterStore::new()),
            probe: Arc::new(StaticProbe::healthy(Duration::from_millis(2))),
        }
    }

    /// Memory source whose effective limit, once the ceiling halves the
    /// process limit, is `limit_mb` (up to the default 128 MB cap)
    pub fn with_memory_mb(mut self, usage_mb: u64, limit_mb: u64) -> Self {
        self.memory = Arc::new(StaticMemory::mb(usage_mb, limit_mb * 2));
        self
    }

    /// Memory source with a raw process limit; 0 means unknown
    pub fn with_process_memory_mb(mut self, usage_mb: u64, process_limit_mb: u64) -> Self {
        self.memory = Arc::new(StaticMemory::mb(usage_mb, process_limit_mb));
        self
    }

    pub fn with_probe(mut self, probe: StaticProbe) -> Self {
        self.probe = Arc::new(probe);
        self
    }

    pub fn with_config(mut self, configure: impl FnOnce(&mut GuardConfig)) -> Self {
        configure(&mut self.config);
        self
    }

    pub fn state(&self) -> AppState {
        AppState::from_parts(
            self.config.clone(),
            self.memory.clone(),
            self.probe.clone(),
            self.store.clone(),
        )
    }
}
