//! Storage layer for the resource guard
//!
//! - `counter`: TTL counter store shared by admission, health checks and reporting
//! - `database`: database reachability probe and maintenance statements

pub mod counter;
pub mod database;

pub use counter::{CounterStore, MemoryCounterStore, evict_pattern};
#[cfg(feature = "redis")]
pub use counter::RedisCounterStore;
pub use database::{DatabaseProbe, SeaOrmProbe, StaticProbe};

use crate::config::{CounterBackend, CounterStoreConfig, ExecutionLimitsConfig};
use crate::utils::error::{GuardError, Result};
use std::sync::Arc;
use tracing::info;

/// Build the configured counter store
pub async fn connect_counter_store(
    config: &CounterStoreConfig,
    limits: &ExecutionLimitsConfig,
) -> Result<Arc<dyn CounterStore>> {
    match config.backend {
        CounterBackend::Memory => {
            info!("Using in-memory counter store");
            let store = Arc::new(MemoryCounterStore::new());
            store.clone().start_sweep_task(std::time::Duration::from_secs(
                config.sweep_interval_secs,
            ));
            Ok(store)
        }
        #[cfg(feature = "redis")]
        CounterBackend::Redis => {
            let url = config.redis_url.as_deref().ok_or_else(|| {
                GuardError::config("counter_store.redis_url is required for the redis backend")
            })?;
            let store = RedisCounterStore::connect(url, limits.socket_timeout()).await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "redis"))]
        CounterBackend::Redis => {
            let _ = limits;
            Err(GuardError::config(
                "counter_store.backend is redis but the `redis` feature is not enabled",
            ))
        }
    }
}
