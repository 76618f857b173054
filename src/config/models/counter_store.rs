//! Counter store backend configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Which counter store backend to use
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CounterBackend {
    /// In-process map; counters are per server process
    #[default]
    Memory,
    /// Shared Redis instance; counters are visible to every process and the CLI
    Redis,
}

/// Counter store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterStoreConfig {
    #[serde(default)]
    pub backend: CounterBackend,
    /// Redis URL, required when `backend` is `redis`
    #[serde(default)]
    pub redis_url: Option<String>,
    /// Interval of the expired-entry sweep for the memory backend
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,
}

impl Default for CounterStoreConfig {
    fn default() -> Self {
        Self {
            backend: CounterBackend::default(),
            redis_url: None,
            sweep_interval_secs: default_sweep_interval(),
        }
    }
}
