//! Resource guard integration tests
//!
//! Full evaluations and emergency cleanups over in-memory backends.

#[cfg(test)]
mod tests {
    use crate::common::{GuardFixture, StatusReportAssertions};
    use resource_guard::monitoring::ResourceAlert;
    use resource_guard::monitoring::alerts::AlertSeverity;
    use resource_guard::monitoring::health::{CleanupStatus, check_names};
    use resource_guard::storage::{CounterStore, StaticProbe};
    use resource_guard::Status;
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(60);

    // ==================== Memory boundaries ====================

    /// Test the 65 MB of 100 MB scenario
    #[tokio::test]
    async fn test_memory_warning_at_65_percent() {
        let fx = GuardFixture::new().with_memory_mb(65, 100);
        let report = fx.state().guard.evaluate("client").await;

        report.assert_check(check_names::MEMORY, Status::Warning);
        assert_eq!(report.checks[check_names::MEMORY].message, "Memory usage: 65.00%");
        assert_eq!(report.status, Status::Warning);
    }

    /// Test that thresholds are strict: exactly 60 is ok, exactly 80 is a warning
    #[tokio::test]
    async fn test_memory_threshold_boundaries() {
        for (usage, expected) in [
            (60, Status::Ok),
            (61, Status::Warning),
            (80, Status::Warning),
            (81, Status::Error),
        ] {
            let fx = GuardFixture::new().with_memory_mb(usage, 100);
            let report = fx.state().guard.evaluate("client").await;
            report.assert_check(check_names::MEMORY, expected);
        }
    }

    /// Test that an unknown process limit falls back to the configured maximum
    #[tokio::test]
    async fn test_memory_without_limit_uses_configured_maximum() {
        let fx = GuardFixture::new().with_process_memory_mb(64, 0);
        let report = fx.state().guard.evaluate("client").await;
        report.assert_check(check_names::MEMORY, Status::Ok);
        assert_eq!(report.checks[check_names::MEMORY].message, "Memory usage: 50.00%");

        let fx = GuardFixture::new()
            .with_process_memory_mb(64, 0)
            .with_config(|c| c.memory.max_memory_limit_mb = 100);
        let report = fx.state().guard.evaluate("client").await;
        report.assert_check(check_names::MEMORY, Status::Warning);
        assert_eq!(report.checks[check_names::MEMORY].message, "Memory usage: 64.00%");
    }

    /// Test that the limit checks see matches the one `/api` work runs under
    #[tokio::test]
    async fn test_memory_ceiling_applied_with_state() {
        let fx = GuardFixture::new().with_process_memory_mb(100, 1024);
        let state = fx.state();
        let before = state.guard.evaluate("client").await;

        state.limiter.prepare().await;
        let after = state.guard.evaluate("client").await;

        assert_eq!(
            before.checks[check_names::MEMORY].message,
            "Memory usage: 78.13%"
        );
        assert_eq!(
            before.checks[check_names::MEMORY].message,
            after.checks[check_names::MEMORY].message
        );
    }

    // ==================== Aggregation ====================

    /// Test that a healthy system reports ok on every check
    #[tokio::test]
    async fn test_all_checks_ok() {
        let fx = GuardFixture::new();
        let report = fx.state().guard.evaluate("client").await;

        assert_eq!(report.status, Status::Ok);
        assert_eq!(report.checks.len(), 5);
        for name in [
            check_names::MEMORY,
            check_names::DATABASE,
            check_names::CACHE,
            check_names::CONCURRENT,
            check_names::EXTERNAL_API,
        ] {
            report.assert_check(name, Status::Ok);
        }
        assert!(ResourceAlert::from_report(&report).is_none());
    }

    /// Test that one failing check makes the whole report an error
    #[tokio::test]
    async fn test_database_failure_is_worst_of() {
        let fx = GuardFixture::new().with_probe(StaticProbe::failing("connection refused"));
        let report = fx.state().guard.evaluate("client").await;

        report.assert_check(check_names::DATABASE, Status::Error);
        report.assert_check(check_names::MEMORY, Status::Ok);
        assert_eq!(report.status, Status::Error);
        assert!(
            report.checks[check_names::DATABASE]
                .message
                .starts_with("Database connection failed:")
        );

        let alert = ResourceAlert::from_report(&report).unwrap();
        assert_eq!(alert.severity, AlertSeverity::Critical);
        assert_eq!(alert.checks, vec![check_names::DATABASE.to_string()]);
    }

    /// Test that a slow database is a warning and a very slow one an error
    #[tokio::test]
    async fn test_database_latency_thresholds() {
        let fx = GuardFixture::new().with_probe(StaticProbe::healthy(Duration::from_millis(1500)));
        let report = fx.state().guard.evaluate("client").await;
        report.assert_check(check_names::DATABASE, Status::Warning);

        let fx = GuardFixture::new().with_probe(StaticProbe::healthy(Duration::from_millis(2500)));
        let report = fx.state().guard.evaluate("client").await;
        report.assert_check(check_names::DATABASE, Status::Error);
    }

    /// Test that saturated counters warn for the evaluated client only
    #[tokio::test]
    async fn test_counter_checks_follow_identity() {
        let fx = GuardFixture::new();
        fx.store
            .put("concurrent_operations_10.1.0.1", "3", TTL)
            .await
            .unwrap();
        fx.store
            .put("external_operations_10.1.0.1", "5", TTL)
            .await
            .unwrap();
        let state = fx.state();

        let report = state.guard.evaluate("10.1.0.1").await;
        report.assert_check(check_names::CONCURRENT, Status::Warning);
        report.assert_counter(check_names::CONCURRENT, 3, 3);
        report.assert_check(check_names::EXTERNAL_API, Status::Warning);
        report.assert_counter(check_names::EXTERNAL_API, 5, 5);
        assert_eq!(report.status, Status::Warning);

        let other = state.guard.evaluate("10.1.0.2").await;
        other.assert_counter(check_names::CONCURRENT, 0, 3);
        assert_eq!(other.status, Status::Ok);
    }

    /// Test that the cache probe leaves nothing behind
    #[tokio::test]
    async fn test_cache_probe_cleans_up() {
        let fx = GuardFixture::new();
        let state = fx.state();

        let _ = tokio::join!(state.guard.evaluate("a"), state.guard.evaluate("b"));
        assert!(fx.store.is_empty());
    }

    // ==================== Emergency cleanup ====================

    /// Test that cleanup reclaims memory and flushes the store
    #[tokio::test]
    async fn test_emergency_cleanup_flushes() {
        let fx = GuardFixture::new();
        fx.store.put("session_u1", "state", TTL).await.unwrap();
        fx.store.put("vendor_user_9", "cached", TTL).await.unwrap();
        fx.store
            .put("concurrent_operations_10.1.0.3", "2", TTL)
            .await
            .unwrap();

        let outcome = fx.state().guard.emergency_cleanup().await;
        assert_eq!(outcome.status, CleanupStatus::Success);
        assert_eq!(outcome.memory_usage_before, 10 * 1024 * 1024);
        assert_eq!(fx.memory.reclaim_count(), 1);
        assert!(fx.store.is_empty());
    }

    /// Test that without a flush only known prefixes and sessions are cleared
    #[tokio::test]
    async fn test_emergency_cleanup_without_flush() {
        let fx = GuardFixture::new().with_config(|c| c.emergency.cache_flush = false);
        fx.store.put("session_u1", "state", TTL).await.unwrap();
        fx.store.put("vendor_user_9", "cached", TTL).await.unwrap();
        fx.store.put("app_setting", "keep", TTL).await.unwrap();

        let outcome = fx.state().guard.emergency_cleanup().await;
        assert!(outcome.is_success());
        assert_eq!(fx.store.get("session_u1").await.unwrap(), None);
        assert_eq!(fx.store.get("vendor_user_9").await.unwrap(), None);
        assert_eq!(
            fx.store.get("app_setting").await.unwrap().as_deref(),
            Some("keep")
        );
    }
}
