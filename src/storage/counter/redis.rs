//! Redis counter store
//!
//! All keys are namespaced so `flush` only touches this store's entries.

use super::CounterStore;
use crate::utils::error::{GuardError, Result};
use ::redis::aio::ConnectionManager;
use ::redis::{AsyncCommands, Client, Script};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

const KEY_NAMESPACE: &str = "resource_guard:";

/// Increment while below ARGV[1]; returns {allowed, value}
const INCREMENT_BELOW_SCRIPT: &str = r#"
local current = tonumber(redis.call('GET', KEYS[1]) or '0') or 0
if current >= tonumber(ARGV[1]) then
    return {0, current}
end
local value = redis.call('INCR', KEYS[1])
redis.call('EXPIRE', KEYS[1], ARGV[2])
return {1, value}
"#;

const DECREMENT_FLOOR_SCRIPT: &str = r#"
local current = tonumber(redis.call('GET', KEYS[1]) or '0') or 0
if current <= 0 then
    return 0
end
local value = redis.call('DECR', KEYS[1])
redis.call('EXPIRE', KEYS[1], ARGV[1])
return value
"#;

pub struct RedisCounterStore {
    manager: ConnectionManager,
    increment_below: Script,
    decrement_floor: Script,
}

impl std::fmt::Debug for RedisCounterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCounterStore").finish_non_exhaustive()
    }
}

impl RedisCounterStore {
    /// Connect, giving up after `connect_timeout`
    pub async fn connect(url: &str, connect_timeout: Duration) -> Result<Self> {
        info!("Connecting counter store to Redis");
        let client = Client::open(url)?;

        let manager = tokio::time::timeout(connect_timeout, client.get_connection_manager())
            .await
            .map_err(|_| {
                GuardError::connectivity(format!(
                    "Redis connection timed out after {}s",
                    connect_timeout.as_secs()
                ))
            })??;

        info!("Redis counter store connected");
        Ok(Self {
            manager,
            increment_below: Script::new(INCREMENT_BELOW_SCRIPT),
            decrement_floor: Script::new(DECREMENT_FLOOR_SCRIPT),
        })
    }

    fn key(key: &str) -> String {
        format!("{KEY_NAMESPACE}{key}")
    }

    async fn scan_keys(&self, pattern: String) -> Result<Vec<String>> {
        let mut conn = self.manager.clone();
        let mut keys = Vec::new();
        let mut iter = conn.scan_match::<_, String>(pattern).await?;
        while let Some(key) = iter.next_item().await {
            keys.push(key);
        }
        Ok(keys)
    }

    async fn delete_all(&self, keys: Vec<String>) -> Result<usize> {
        if keys.is_empty() {
            return Ok(0);
        }
        let mut conn = self.manager.clone();
        let removed: usize = conn.del(keys).await?;
        Ok(removed)
    }
}

fn ttl_secs(ttl: Duration) -> u64 {
    ttl.as_secs().max(1)
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    fn name(&self) -> &'static str {
        "redis"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(Self::key(key)).await?;
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.set_ex(Self::key(key), value, ttl_secs(ttl)).await?;
        Ok(())
    }

    async fn forget(&self, key: &str) -> Result<bool> {
        let mut conn = self.manager.clone();
        let removed: usize = conn.del(Self::key(key)).await?;
        Ok(removed > 0)
    }

    async fn flush(&self) -> Result<()> {
        let removed = self.forget_prefix("").await?;
        debug!(removed, "Flushed Redis counter store");
        Ok(())
    }

    async fn forget_prefix(&self, prefix: &str) -> Result<usize> {
        let keys = self.scan_keys(format!("{}*", Self::key(prefix))).await?;
        self.delete_all(keys).await
    }

    async fn increment_below(&self, key: &str, max: i64, ttl: Duration) -> Result<Option<i64>> {
        let mut conn = self.manager.clone();
        let (allowed, value): (i64, i64) = self
            .increment_below
            .key(Self::key(key))
            .arg(max)
            .arg(ttl_secs(ttl))
            .invoke_async(&mut conn)
            .await?;
        Ok((allowed == 1).then_some(value))
    }

    async fn decrement_floor(&self, key: &str, ttl: Duration) -> Result<i64> {
        let mut conn = self.manager.clone();
        let value: i64 = self
            .decrement_floor
            .key(Self::key(key))
            .arg(ttl_secs(ttl))
            .invoke_async(&mut conn)
            .await?;
        Ok(value)
    }

    async fn push_bounded(
        &self,
        key: &str,
        value: String,
        cap: usize,
        ttl: Duration,
    ) -> Result<()> {
        let key = Self::key(key);
        let keep = isize::try_from(cap).unwrap_or(isize::MAX);
        let mut conn = self.manager.clone();
        let _: () = ::redis::pipe()
            .atomic()
            .rpush(&key, value)
            .ignore()
            .ltrim(&key, -keep, -1)
            .ignore()
            .expire(&key, ttl_secs(ttl) as i64)
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn list(&self, key: &str) -> Result<Vec<String>> {
        let mut conn = self.manager.clone();
        let items: Vec<String> = conn.lrange(Self::key(key), 0, -1).await?;
        Ok(items)
    }
}
