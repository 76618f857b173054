//! Application state shared across HTTP handlers and the CLI

use crate::config::{Config, GuardConfig};
use crate::core::admission::{AdmissionLimiter, ExecutionLimits, apply_memory_ceiling};
use crate::monitoring::health::ResourceGuard;
use crate::monitoring::memory::{MemorySource, ProcessMemory};
use crate::monitoring::reporter::Reporter;
use crate::storage::counter::CounterStore;
use crate::storage::database::{DatabaseProbe, SeaOrmProbe};
use crate::storage::connect_counter_store;
use crate::utils::error::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Shared components; every field is cheap to clone
#[derive(Debug, Clone)]
pub struct AppState {
    pub config: Arc<GuardConfig>,
    pub guard: Arc<ResourceGuard>,
    pub limiter: AdmissionLimiter,
    pub reporter: Arc<Reporter>,
    pub store: Arc<dyn CounterStore>,
    pub limits: ExecutionLimits,
}

impl AppState {
    /// Connect the configured backends and wire the components together
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Initializing resource guard components");
        let guard_config = &config.guard;
        let limits = ExecutionLimits::from(&guard_config.limits);

        let store = connect_counter_store(&guard_config.counter_store, &guard_config.limits).await?;
        let memory: Arc<dyn MemorySource> =
            Arc::new(ProcessMemory::new(guard_config.memory.process_limit_mb));
        let database: Arc<dyn DatabaseProbe> =
            Arc::new(SeaOrmProbe::new(&guard_config.database, limits.socket));

        info!(
            store = store.name(),
            memory_limit = memory.base_limit(),
            "Resource guard components ready"
        );
        Ok(Self::from_parts(guard_config.clone(), memory, database, store))
    }

    /// Wire pre-built backends.
    ///
    /// Lowers `memory` to the effective ceiling before any component reads it.
    pub fn from_parts(
        config: GuardConfig,
        memory: Arc<dyn MemorySource>,
        database: Arc<dyn DatabaseProbe>,
        store: Arc<dyn CounterStore>,
    ) -> Self {
        let config = Arc::new(config);
        let limits = ExecutionLimits::from(&config.limits);
        let ceiling = apply_memory_ceiling(memory.as_ref(), &config.memory);
        debug!(ceiling, "Memory ceiling applied");

        let reporter = Arc::new(Reporter::new(
            memory.clone(),
            store.clone(),
            config.monitoring.clone(),
            config.cache.clone(),
        ));
        let guard = Arc::new(ResourceGuard::new(
            memory.clone(),
            database,
            store.clone(),
            reporter.clone(),
            config.clone(),
        ));
        let limiter = AdmissionLimiter::new(store.clone(), memory, config.clone());

        Self {
            config,
            guard,
            limiter,
            reporter,
            store,
            limits,
        }
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }
}
