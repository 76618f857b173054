//! Statistics integration tests

#[cfg(test)]
mod tests {
    use crate::common::GuardFixture;
    use crate::common::fixtures::MB;
    use chrono::{TimeZone, Utc};
    use resource_guard::ResourceStats;
    use resource_guard::monitoring::reporter::bucket_key;
    use resource_guard::storage::CounterStore;

    /// Test the [50, 72, 81, 60, 90] percent scenario against a 100 MB limit
    #[tokio::test]
    async fn test_high_memory_operations_and_mean() {
        let fx = GuardFixture::new().with_memory_mb(50, 100);
        let state = fx.state();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 15, 0).unwrap();

        for usage in [50, 72, 81, 60, 90] {
            fx.memory.set_usage(usage * MB);
            state.reporter.record_sample_at("import", at).await.unwrap();
        }

        let stats = state.reporter.statistics_at(24, at).await.unwrap();
        assert_eq!(stats.total_operations, 5);
        assert_eq!(stats.high_memory_operations, 3);
        let expected_mean = ((50 + 72 + 81 + 60 + 90) * MB) as f64 / 5.0;
        assert!((stats.average_memory_usage - expected_mean).abs() < 0.01);
        assert_eq!(stats.peak_memory_usage, 90 * MB);
    }

    /// Test that an empty window is all zeros
    #[tokio::test]
    async fn test_empty_window() {
        let fx = GuardFixture::new();
        let stats = fx.state().reporter.statistics(24).await.unwrap();
        assert_eq!(stats, ResourceStats::default());
    }

    /// Test that samples outside the window are ignored
    #[tokio::test]
    async fn test_window_excludes_older_buckets() {
        let fx = GuardFixture::new();
        let state = fx.state();
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let three_hours_ago = Utc.with_ymd_and_hms(2024, 5, 1, 7, 30, 0).unwrap();

        state.reporter.record_sample_at("old", three_hours_ago).await.unwrap();
        state.reporter.record_sample_at("new", now).await.unwrap();

        assert_eq!(
            state.reporter.statistics_at(3, now).await.unwrap().total_operations,
            1
        );
        assert_eq!(
            state.reporter.statistics_at(4, now).await.unwrap().total_operations,
            2
        );
    }

    /// Test that a bucket keeps only the newest hundred samples
    #[tokio::test]
    async fn test_bucket_capacity() {
        let fx = GuardFixture::new();
        let state = fx.state();
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        for _ in 0..105 {
            state.reporter.record_sample_at("burst", at).await.unwrap();
        }

        assert_eq!(fx.store.list(&bucket_key(at)).await.unwrap().len(), 100);
        assert_eq!(
            state.reporter.statistics_at(1, at).await.unwrap().total_operations,
            100
        );
    }

    /// Test that cleanup drops buckets but keeps concurrency and unrelated counters
    #[tokio::test]
    async fn test_cleanup_old_entries() {
        let fx = GuardFixture::new();
        let state = fx.state();
        let ttl = std::time::Duration::from_secs(60);
        state.reporter.record_sample("op").await.unwrap();
        fx.store.put("concurrent_operations_x", "1", ttl).await.unwrap();
        fx.store.put("import_operations_x", "1", ttl).await.unwrap();

        let removed = state.reporter.cleanup_old_entries().await.unwrap();
        assert_eq!(removed, 1);
        assert_eq!(state.reporter.statistics(24).await.unwrap().total_operations, 0);
        assert_eq!(fx.store.counter("concurrent_operations_x").await.unwrap(), 1);
        assert_eq!(fx.store.counter("import_operations_x").await.unwrap(), 1);
    }
}
