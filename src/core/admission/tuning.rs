//! Environment tuning applied before guarded work

use crate::config::{ExecutionLimitsConfig, MemoryConfig};
use crate::monitoring::memory::MemorySource;
use std::time::Duration;
use tracing::trace;

/// Effective memory ceiling: half the process limit, capped at `max_bytes`.
///
/// An unknown process limit (0) yields `max_bytes`.
pub fn effective_ceiling(process_limit: u64, max_bytes: u64) -> u64 {
    if process_limit == 0 {
        max_bytes
    } else {
        (process_limit / 2).min(max_bytes)
    }
}

/// Lower the memory source's reported limit to the effective ceiling.
///
/// Always computed from the base limit, so repeated calls do not compound.
pub fn apply_memory_ceiling(memory: &dyn MemorySource, config: &MemoryConfig) -> u64 {
    let ceiling = effective_ceiling(memory.base_limit(), config.max_memory_limit_bytes());
    memory.apply_ceiling(ceiling);
    trace!(ceiling, "Applied effective memory ceiling");
    ceiling
}

/// Conservative timeouts for guarded work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutionLimits {
    /// Budget for the handler future
    pub execution: Duration,
    /// Budget for receiving the request head
    pub input: Duration,
    /// Connect timeout for database and Redis sockets
    pub socket: Duration,
}

impl From<&ExecutionLimitsConfig> for ExecutionLimits {
    fn from(config: &ExecutionLimitsConfig) -> Self {
        Self {
            execution: config.execution_timeout(),
            input: config.input_timeout(),
            socket: config.socket_timeout(),
        }
    }
}

impl Default for ExecutionLimits {
    fn default() -> Self {
        Self::from(&ExecutionLimitsConfig::default())
    }
}
