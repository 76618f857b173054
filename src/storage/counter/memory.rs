//! In-process counter store backed by `DashMap`

use super::CounterStore;
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug, Clone)]
enum Slot {
    Scalar(String),
    List(VecDeque<String>),
}

#[derive(Debug, Clone)]
struct Entry {
    slot: Slot,
    expires_at: Instant,
}

impl Entry {
    fn scalar(value: impl Into<String>, ttl: Duration) -> Self {
        Self {
            slot: Slot::Scalar(value.into()),
            expires_at: Instant::now() + ttl,
        }
    }

    fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    fn as_counter(&self) -> i64 {
        match &self.slot {
            Slot::Scalar(v) => v.trim().parse().unwrap_or(0),
            Slot::List(_) => 0,
        }
    }
}

/// Counter store local to one process.
///
/// Each operation runs under the map's shard lock for its key, so
/// read-modify-write sequences on a single key are atomic.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    entries: DashMap<String, Entry>,
}

impl MemoryCounterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.iter().filter(|e| !e.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop expired entries; returns the number removed
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        before.saturating_sub(self.entries.len())
    }

    /// Periodically purge expired entries in the background
    pub fn start_sweep_task(self: Arc<Self>, interval: Duration) {
        let store = Arc::downgrade(&self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(store) = store.upgrade() else {
                    break;
                };
                let removed = store.purge_expired();
                if removed > 0 {
                    debug!(removed, "Purged expired counter entries");
                }
            }
        });
    }
}

#[async_trait]
impl CounterStore for MemoryCounterStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let now = Instant::now();
        let value = self.entries.get(key).and_then(|entry| {
            if entry.is_expired(now) {
                return None;
            }
            match &entry.slot {
                Slot::Scalar(v) => Some(v.clone()),
                Slot::List(_) => None,
            }
        });
        Ok(value)
    }

    async fn put(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.entries.insert(key.to_string(), Entry::scalar(value, ttl));
        Ok(())
    }

    async fn forget(&self, key: &str) -> Result<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .remove(key)
            .is_some_and(|(_, entry)| !entry.is_expired(now)))
    }

    async fn flush(&self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }

    async fn forget_prefix(&self, prefix: &str) -> Result<usize> {
        let keys: Vec<String> = self
            .entries
            .iter()
            .filter(|e| e.key().starts_with(prefix))
            .map(|e| e.key().clone())
            .collect();

        Ok(keys
            .iter()
            .filter(|key| self.entries.remove(key.as_str()).is_some())
            .count())
    }

    async fn increment_below(&self, key: &str, max: i64, ttl: Duration) -> Result<Option<i64>> {
        let now = Instant::now();
        let mut entry = self
            .entries
            .entry(key.to_string())
            .or_insert_with(|| Entry::scalar("0", ttl));
        if entry.is_expired(now) {
            *entry = Entry::scalar("0", ttl);
        }

        let current = entry.as_counter();
        if current >= max {
            return Ok(None);
        }

        let next = current + 1;
        *entry = Entry::scalar(next.to_string(), ttl);
        Ok(Some(next))
    }

    async fn decrement_floor(&self, key: &str, ttl: Duration) -> Result<i64> {
        let now = Instant::now();
        let Some(mut entry) = self.entries.get_mut(key) else {
            return Ok(0);
        };
        if entry.is_expired(now) {
            drop(entry);
            self.entries.remove(key);
            return Ok(0);
        }

        let current = entry.as_counter();
        if current <= 0 {
            return Ok(0);
        }

        let next = current - 1;
        *entry = Entry::scalar(next.to_string(), ttl);
        Ok(next)
    }

    async fn push_bounded(
        &self,
        key: &str,
        value: String,
        cap: usize,
        ttl: Duration,
    ) -> Result<()> {
        let now = Instant::now();
        let mut entry = self.entries.entry(key.to_string()).or_insert_with(|| Entry {
            slot: Slot::List(VecDeque::new()),
            expires_at: now + ttl,
        });
        if entry.is_expired(now) || !matches!(entry.slot, Slot::List(_)) {
            entry.slot = Slot::List(VecDeque::new());
        }

        if let Slot::List(items) = &mut entry.slot {
            items.push_back(value);
            while items.len() > cap {
                items.pop_front();
            }
        }
        entry.expires_at = now + ttl;
        Ok(())
    }

    async fn list(&self, key: &str) -> Result<Vec<String>> {
        let now = Instant::now();
        let items = self
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired(now))
            .and_then(|entry| match &entry.slot {
                Slot::List(items) => Some(items.iter().cloned().collect()),
                Slot::Scalar(_) => None,
            })
            .unwrap_or_default();
        Ok(items)
    }
}
