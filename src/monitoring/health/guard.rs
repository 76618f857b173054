//! Resource guard evaluation and emergency cleanup

use super::checks::{classify_cache, classify_counter, classify_database, classify_memory};
use super::types::{CheckResult, CleanupOutcome, CleanupStatus, StatusReport};
use crate::config::GuardConfig;
use crate::core::admission::{OperationKind, concurrency_key};
use crate::monitoring::memory::MemorySource;
use crate::monitoring::reporter::{Reporter, ResourceStats};
use crate::storage::counter::{CounterStore, evict_pattern};
use crate::storage::database::DatabaseProbe;
use crate::utils::current_timestamp;
use crate::utils::error::Result;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

const PROBE_VALUE: &str = "test_value";
const PROBE_TTL: Duration = Duration::from_secs(60);
const SESSION_PREFIX: &str = "session_";

/// Names of the checks in every report
pub mod check_names {
    pub const MEMORY: &str = "memory";
    pub const DATABASE: &str = "database";
    pub const CACHE: &str = "cache";
    pub const CONCURRENT: &str = "concurrent";
    pub const EXTERNAL_API: &str = "external_api";
}

#[derive(Debug)]
pub struct ResourceGuard {
    memory: Arc<dyn MemorySource>,
    database: Arc<dyn DatabaseProbe>,
    store: Arc<dyn CounterStore>,
    reporter: Arc<Reporter>,
    config: Arc<GuardConfig>,
    probe_seq: AtomicU64,
}

impl ResourceGuard {
    pub fn new(
        memory: Arc<dyn MemorySource>,
        database: Arc<dyn DatabaseProbe>,
        store: Arc<dyn CounterStore>,
        reporter: Arc<Reporter>,
        config: Arc<GuardConfig>,
    ) -> Self {
        Self {
            memory,
            database,
            store,
            reporter,
            config,
            probe_seq: AtomicU64::new(0),
        }
    }

    /// Evaluate every check for `identity` and build a report.
    ///
    /// Any single failing check degrades the whole report; there is no
    /// distinction between fatal and transient failures.
    pub async fn evaluate(&self, identity: &str) -> StatusReport {
        let rate = &self.config.rate_limiting;
        let external = OperationKind::ExternalApi;

        let (database, cache, concurrent, external_api, statistics) = tokio::join!(
            self.check_database(),
            self.check_cache(),
            async {
                classify_counter(
                    check_names::CONCURRENT,
                    "Concurrent operations",
                    self.store.counter(&concurrency_key(identity)).await,
                    rate.concurrent_operations,
                )
            },
            async {
                classify_counter(
                    check_names::EXTERNAL_API,
                    "External API operations",
                    self.store.counter(&external.key(identity)).await,
                    external.max(rate),
                )
            },
            self.statistics(),
        );

        let checks = vec![
            self.check_memory(),
            database,
            cache,
            concurrent,
            external_api,
        ];
        let report = StatusReport::new(checks, statistics);
        debug!(status = %report.status, identity, "Resource evaluation finished");
        report
    }

    fn check_memory(&self) -> CheckResult {
        let memory = &self.config.memory;
        classify_memory(
            self.memory.snapshot(),
            memory.max_usage_percent,
            memory.emergency_cleanup_threshold,
        )
    }

    async fn check_database(&self) -> CheckResult {
        classify_database(self.database.acquire().await)
    }

    async fn check_cache(&self) -> CheckResult {
        classify_cache(self.cache_round_trip().await)
    }

    async fn cache_round_trip(&self) -> Result<(Duration, bool)> {
        let seq = self.probe_seq.fetch_add(1, Ordering::Relaxed);
        let key = format!("cache_test_{}_{}", current_timestamp(), seq);

        let start = Instant::now();
        self.store.put(&key, PROBE_VALUE, PROBE_TTL).await?;
        let read = self.store.get(&key).await?;
        self.store.forget(&key).await?;

        Ok((start.elapsed(), read.as_deref() == Some(PROBE_VALUE)))
    }

    async fn statistics(&self) -> ResourceStats {
        let hours = self.config.monitoring.metrics_retention_hours;
        match self.reporter.statistics(hours).await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "Failed to read resource statistics");
                ResourceStats::default()
            }
        }
    }

    /// Reclaim memory and clear the counter store.
    ///
    /// With `emergency.cache_flush` the whole store is flushed, which also
    /// removes session-scoped state. Otherwise the known key families are
    /// evicted, plus `session_` entries when `emergency.session_cleanup` is
    /// set. The first store error aborts the cleanup; it is logged and
    /// reported, never retried.
    pub async fn emergency_cleanup(&self) -> CleanupOutcome {
        let before = self.memory.snapshot().usage;
        self.memory.reclaim();

        match self.clear_store().await {
            Ok(()) => {
                let after = self.memory.snapshot().usage;
                info!(
                    memory_before = before,
                    memory_after = after,
                    store = self.store.name(),
                    "Emergency resource cleanup performed"
                );
                CleanupOutcome {
                    status: CleanupStatus::Success,
                    message: "Emergency cleanup completed".to_string(),
                    memory_usage_before: before,
                    memory_usage_after: after,
                }
            }
            Err(e) => {
                error!(error = %e, "Emergency cleanup failed");
                CleanupOutcome {
                    status: CleanupStatus::Error,
                    message: format!("Emergency cleanup failed: {e}"),
                    memory_usage_before: before,
                    memory_usage_after: self.memory.snapshot().usage,
                }
            }
        }
    }

    async fn clear_store(&self) -> Result<()> {
        let emergency = &self.config.emergency;
        if emergency.cache_flush {
            return self.store.flush().await;
        }

        let cache = &self.config.cache;
        for pattern in cache.pressure_patterns.iter().chain(&cache.cleanup_patterns) {
            evict_pattern(self.store.as_ref(), pattern, cache.pattern_eviction).await?;
        }
        if emergency.session_cleanup {
            self.store.forget_prefix(SESSION_PREFIX).await?;
        }
        Ok(())
    }

    pub fn reporter(&self) -> &Arc<Reporter> {
        &self.reporter
    }

    pub fn memory(&self) -> &Arc<dyn MemorySource> {
        &self.memory
    }

    pub fn database(&self) -> &Arc<dyn DatabaseProbe> {
        &self.database
    }
}
