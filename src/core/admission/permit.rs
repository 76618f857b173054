//! Scoped concurrency slot

use crate::storage::counter::CounterStore;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// A held concurrency slot.
///
/// Call [`release`](Self::release) when the unit of work completes. If the
/// permit is dropped unreleased (panic, cancellation, early return) the
/// decrement is spawned onto the current runtime. Without a runtime the slot
/// is left to expire through the counter TTL.
#[must_use = "dropping a permit releases its slot immediately"]
#[derive(Debug)]
pub struct AdmissionPermit {
    store: Arc<dyn CounterStore>,
    key: String,
    ttl: Duration,
    in_flight: i64,
    released: bool,
}

impl AdmissionPermit {
    pub(super) fn new(store: Arc<dyn CounterStore>, key: String, ttl: Duration, in_flight: i64) -> Self {
        Self {
            store,
            key,
            ttl,
            in_flight,
            released: false,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Counter value right after this permit was admitted
    pub fn in_flight(&self) -> i64 {
        self.in_flight
    }

    /// Release the slot; returns the remaining in-flight count
    pub async fn release(mut self) -> Result<i64> {
        self.released = true;
        let remaining = self.store.decrement_floor(&self.key, self.ttl).await?;
        debug!(key = %self.key, remaining, "Released concurrency slot");
        Ok(remaining)
    }
}

impl Drop for AdmissionPermit {
    fn drop(&mut self) {
        if self.released {
            return;
        }

        let store = self.store.clone();
        let key = std::mem::take(&mut self.key);
        let ttl = self.ttl;
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = store.decrement_floor(&key, ttl).await {
                        warn!(key = %key, error = %e, "Failed to release dropped concurrency slot");
                    }
                });
            }
            Err(_) => {
                warn!(key = %key, "No runtime to release concurrency slot; it will expire via TTL");
            }
        }
    }
}
