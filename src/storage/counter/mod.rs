//! Counter store
//!
//! A small key/value store with per-entry TTLs. Integer counters, probe
//! values and bounded sample lists live side by side. Every mutation the
//! admission path depends on is a single atomic store operation.

mod memory;
#[cfg(feature = "redis")]
mod redis;

pub use memory::MemoryCounterStore;
#[cfg(feature = "redis")]
pub use self::redis::RedisCounterStore;

use crate::config::PatternEviction;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait CounterStore: Send + Sync + std::fmt::Debug {
    /// Backend name for logs and reports
    fn name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Remove a key; returns whether it existed
    async fn forget(&self, key: &str) -> Result<bool>;

    /// Remove every entry owned by this store
    async fn flush(&self) -> Result<()>;

    /// Remove every key starting with `prefix`; returns the number removed
    async fn forget_prefix(&self, prefix: &str) -> Result<usize>;

    /// Read an integer counter. Missing or non-numeric entries read as 0.
    async fn counter(&self, key: &str) -> Result<i64> {
        Ok(self
            .get(key)
            .await?
            .and_then(|v| v.trim().parse::<i64>().ok())
            .unwrap_or(0))
    }

    /// Increment `key` only while it is below `max`.
    ///
    /// Returns the new value, or `None` when the counter was already at or
    /// above `max` (the counter is left unchanged). The TTL is reset on
    /// every successful increment.
    async fn increment_below(&self, key: &str, max: i64, ttl: Duration) -> Result<Option<i64>>;

    /// Decrement `key` if it is above zero and return the resulting value
    async fn decrement_floor(&self, key: &str, ttl: Duration) -> Result<i64>;

    /// Append to a list, dropping the oldest items beyond `cap`
    async fn push_bounded(&self, key: &str, value: String, cap: usize, ttl: Duration)
    -> Result<()>;

    /// Read a list; missing keys read as empty
    async fn list(&self, key: &str) -> Result<Vec<String>>;
}

/// Evict keys matching a pattern such as `validation_*`.
///
/// In `Prefix` mode a trailing `*` is stripped and every key with that
/// prefix is removed. In `Literal` mode the pattern string itself is
/// forgotten as a single key.
pub async fn evict_pattern(
    store: &dyn CounterStore,
    pattern: &str,
    mode: PatternEviction,
) -> Result<usize> {
    let removed = match mode {
        PatternEviction::Prefix => {
            let prefix = pattern.trim_end_matches('*');
            store.forget_prefix(prefix).await?
        }
        PatternEviction::Literal => usize::from(store.forget(pattern).await?),
    };
    debug!(pattern, removed, "Evicted counter store pattern");
    Ok(removed)
}
