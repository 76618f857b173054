//! Conservative execution limits applied by the admission layer

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionLimitsConfig {
    /// Budget for one guarded unit of work
    #[serde(default = "default_execution_timeout")]
    pub execution_timeout_secs: u64,
    /// Budget for receiving a request head
    #[serde(default = "default_input_timeout")]
    pub input_timeout_secs: u64,
    /// Connect timeout for database and Redis sockets
    #[serde(default = "default_socket_timeout")]
    pub socket_timeout_secs: u64,
    /// Safety-net TTL of the concurrency counter
    #[serde(default = "default_concurrency_ttl")]
    pub concurrency_ttl_secs: u64,
}

impl Default for ExecutionLimitsConfig {
    fn default() -> Self {
        Self {
            execution_timeout_secs: default_execution_timeout(),
            input_timeout_secs: default_input_timeout(),
            socket_timeout_secs: default_socket_timeout(),
            concurrency_ttl_secs: default_concurrency_ttl(),
        }
    }
}

impl ExecutionLimitsConfig {
    pub fn execution_timeout(&self) -> Duration {
        Duration::from_secs(self.execution_timeout_secs)
    }

    pub fn input_timeout(&self) -> Duration {
        Duration::from_secs(self.input_timeout_secs)
    }

    pub fn socket_timeout(&self) -> Duration {
        Duration::from_secs(self.socket_timeout_secs)
    }

    pub fn concurrency_ttl(&self) -> Duration {
        Duration::from_secs(self.concurrency_ttl_secs)
    }
}
