//! Resource sample recording and statistics
//!
//! Samples are appended to one list per UTC hour in the counter store under
//! `resource_metrics_YYYY-MM-DD-HH`. Statistics walk the most recent hourly
//! buckets; a bucket that is missing or expired simply contributes nothing.

use super::memory::{MemorySnapshot, MemorySource};
use crate::config::{CacheConfig, MonitoringConfig};
use crate::storage::counter::{CounterStore, evict_pattern};
use crate::utils::error::Result;
use crate::utils::round2;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Key prefix of hourly sample buckets
pub const BUCKET_PREFIX: &str = "resource_metrics_";

/// Maximum samples kept per hourly bucket
pub const BUCKET_CAPACITY: usize = 100;

/// Bucket key for the UTC hour containing `at`
pub fn bucket_key(at: DateTime<Utc>) -> String {
    format!("{}{}", BUCKET_PREFIX, at.format("%Y-%m-%d-%H"))
}

/// One point-in-time resource measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub operation: String,
    pub memory_usage: u64,
    pub memory_peak: u64,
    pub memory_limit: u64,
    /// Usage as percent of limit, rounded to two decimals
    pub memory_percent: f64,
    pub timestamp: DateTime<Utc>,
}

impl MetricSample {
    pub fn capture(operation: impl Into<String>, snapshot: MemorySnapshot, at: DateTime<Utc>) -> Self {
        Self {
            operation: operation.into(),
            memory_usage: snapshot.usage,
            memory_peak: snapshot.peak,
            memory_limit: snapshot.limit,
            memory_percent: round2(snapshot.percent()),
            timestamp: at,
        }
    }
}

/// Aggregated statistics over a lookback window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceStats {
    pub total_operations: u64,
    pub high_memory_operations: u64,
    /// Mean of raw `memory_usage`, rounded to two decimals
    pub average_memory_usage: f64,
    /// Largest `memory_peak` seen
    pub peak_memory_usage: u64,
}

/// Historical statistics plus a fresh sample
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailedStats {
    pub historical: ResourceStats,
    pub current: MetricSample,
    pub timestamp: DateTime<Utc>,
}

/// Aggregate samples. A sample is high memory when its percent is strictly
/// above `alert_threshold`.
pub fn aggregate<'a, I>(samples: I, alert_threshold: f64) -> ResourceStats
where
    I: IntoIterator<Item = &'a MetricSample>,
{
    let mut stats = ResourceStats::default();
    let mut total_usage: u128 = 0;

    for sample in samples {
        stats.total_operations += 1;
        total_usage += u128::from(sample.memory_usage);
        stats.peak_memory_usage = stats.peak_memory_usage.max(sample.memory_peak);
        if sample.memory_percent > alert_threshold {
            stats.high_memory_operations += 1;
        }
    }

    if stats.total_operations > 0 {
        stats.average_memory_usage =
            round2(total_usage as f64 / stats.total_operations as f64);
    }
    stats
}

#[derive(Debug)]
pub struct Reporter {
    memory: Arc<dyn MemorySource>,
    store: Arc<dyn CounterStore>,
    monitoring: MonitoringConfig,
    cache: CacheConfig,
}

impl Reporter {
    pub fn new(
        memory: Arc<dyn MemorySource>,
        store: Arc<dyn CounterStore>,
        monitoring: MonitoringConfig,
        cache: CacheConfig,
    ) -> Self {
        Self {
            memory,
            store,
            monitoring,
            cache,
        }
    }

    /// Default lookback window in hours
    pub fn retention_hours(&self) -> u32 {
        self.monitoring.metrics_retention_hours
    }

    fn bucket_ttl(&self) -> Duration {
        Duration::from_secs(u64::from(self.monitoring.metrics_retention_hours.max(1)) * 3600)
    }

    /// Capture the current memory state and append it to this hour's bucket
    pub async fn record_sample(&self, operation: &str) -> Result<MetricSample> {
        self.record_sample_at(operation, Utc::now()).await
    }

    pub async fn record_sample_at(&self, operation: &str, at: DateTime<Utc>) -> Result<MetricSample> {
        let sample = MetricSample::capture(operation, self.memory.snapshot(), at);

        if self.monitoring.log_high_memory_usage
            && sample.memory_percent > self.monitoring.alert_threshold
        {
            warn!(
                operation = %sample.operation,
                memory_usage = sample.memory_usage,
                memory_peak = sample.memory_peak,
                memory_limit = sample.memory_limit,
                memory_percent = sample.memory_percent,
                "High memory usage detected"
            );
        }

        let encoded = serde_json::to_string(&sample)?;
        self.store
            .push_bounded(&bucket_key(at), encoded, BUCKET_CAPACITY, self.bucket_ttl())
            .await?;
        Ok(sample)
    }

    /// Read every sample in the last `window_hours` hourly buckets
    pub async fn samples_at(&self, window_hours: u32, now: DateTime<Utc>) -> Result<Vec<MetricSample>> {
        let mut samples = Vec::new();
        for hour in 0..window_hours {
            let key = bucket_key(now - chrono::Duration::hours(i64::from(hour)));
            for raw in self.store.list(&key).await? {
                match serde_json::from_str::<MetricSample>(&raw) {
                    Ok(sample) => samples.push(sample),
                    Err(e) => debug!(key = %key, error = %e, "Skipping unreadable metric sample"),
                }
            }
        }
        Ok(samples)
    }

    pub async fn statistics(&self, window_hours: u32) -> Result<ResourceStats> {
        self.statistics_at(window_hours, Utc::now()).await
    }

    pub async fn statistics_at(&self, window_hours: u32, now: DateTime<Utc>) -> Result<ResourceStats> {
        let samples = self.samples_at(window_hours, now).await?;
        Ok(aggregate(&samples, self.monitoring.alert_threshold))
    }

    /// Statistics over the retention window plus a fresh sample labelled `operation`
    pub async fn detailed(&self, operation: &str) -> Result<DetailedStats> {
        let historical = self.statistics(self.retention_hours()).await?;
        let current = self.record_sample(operation).await?;
        Ok(DetailedStats {
            historical,
            current,
            timestamp: Utc::now(),
        })
    }

    /// Evict the configured cleanup patterns; returns the number of keys removed
    pub async fn cleanup_old_entries(&self) -> Result<usize> {
        let mut removed = 0;
        for pattern in &self.cache.cleanup_patterns {
            removed += evict_pattern(self.store.as_ref(), pattern, self.cache.pattern_eviction).await?;
        }
        info!(removed, "Cache cleanup completed");
        Ok(removed)
    }
}
