//! Per-client concurrency and rate gates

use super::keys::{OperationKind, concurrency_key};
use super::permit::AdmissionPermit;
use super::pressure::{PressureLevel, relieve};
use crate::config::GuardConfig;
use crate::monitoring::memory::MemorySource;
use crate::storage::counter::CounterStore;
use crate::utils::error::{GuardError, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct AdmissionLimiter {
    store: Arc<dyn CounterStore>,
    memory: Arc<dyn MemorySource>,
    config: Arc<GuardConfig>,
}

impl AdmissionLimiter {
    pub fn new(
        store: Arc<dyn CounterStore>,
        memory: Arc<dyn MemorySource>,
        config: Arc<GuardConfig>,
    ) -> Self {
        Self {
            store,
            memory,
            config,
        }
    }

    /// Pressure housekeeping run before each unit of work
    pub async fn prepare(&self) -> PressureLevel {
        relieve(
            self.memory.as_ref(),
            self.store.as_ref(),
            &self.config.memory,
            &self.config.cache,
        )
        .await
    }

    /// Take a concurrency slot for `identity`.
    ///
    /// Rejects with `too_many_concurrent_operations` once the identity holds
    /// `rate_limiting.concurrent_operations` slots; a rejected attempt does
    /// not touch the counter.
    pub async fn acquire(&self, identity: &str) -> Result<AdmissionPermit> {
        let key = concurrency_key(identity);
        let max = self.config.rate_limiting.concurrent_operations;
        let ttl = self.config.limits.concurrency_ttl();

        let admitted = self
            .store
            .increment_below(&key, max, ttl)
            .await
            .map_err(|e| GuardError::connectivity(format!("counter store unavailable: {e}")))?;

        match admitted {
            Some(in_flight) => {
                debug!(identity, in_flight, max, "Admitted guarded operation");
                Ok(AdmissionPermit::new(self.store.clone(), key, ttl, in_flight))
            }
            None => {
                warn!(identity, max, "Rejected: too many concurrent operations");
                Err(GuardError::too_many_concurrent())
            }
        }
    }

    /// Count one `kind` operation against `identity`'s window.
    ///
    /// Returns the new count, or rejects without changing the counter when
    /// the window is full. The window length is `rate_limiting.timeout`.
    pub async fn check_rate(&self, kind: OperationKind, identity: &str) -> Result<i64> {
        let window = Duration::from_secs(self.config.rate_limiting.timeout);
        let max = kind.max(&self.config.rate_limiting);

        let admitted = self
            .store
            .increment_below(&kind.key(identity), max, window)
            .await
            .map_err(|e| GuardError::connectivity(format!("counter store unavailable: {e}")))?;

        admitted.ok_or_else(|| {
            warn!(identity, %kind, max, "Rejected: rate limit exceeded");
            GuardError::rate_limited(
                format!("Too many {kind} operations. Please wait before trying again."),
                kind.reason(),
                window.as_secs(),
            )
        })
    }

    /// Current concurrency counter for `identity`
    pub async fn in_flight(&self, identity: &str) -> Result<i64> {
        self.store.counter(&concurrency_key(identity)).await
    }

    pub fn config(&self) -> &Arc<GuardConfig> {
        &self.config
    }
}
