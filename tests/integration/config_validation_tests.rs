//! Configuration validation integration tests
//!
//! These tests verify that configuration loads with its documented defaults
//! and fails appropriately for invalid values.

#[cfg(test)]
mod tests {
    use resource_guard::config::models::{CounterBackend, PatternEviction};
    use resource_guard::config::{Config, GuardConfig, Validate};
    use std::io::Write;
    use tempfile::NamedTempFile;

    // ==================== Defaults ====================

    /// Test that defaults match the documented thresholds
    #[test]
    fn test_default_thresholds() {
        let config = GuardConfig::default();

        assert_eq!(config.memory.max_usage_percent, 60.0);
        assert_eq!(config.memory.emergency_cleanup_threshold, 80.0);
        assert_eq!(config.memory.chunk_size, 25);
        assert_eq!(config.memory.max_memory_limit_mb, 128);
        assert_eq!(config.database.batch_size, 50);
        assert_eq!(config.database.query_timeout, 10);
        assert_eq!(config.firebase.rate_limit_per_minute, 3);
        assert_eq!(config.rate_limiting.concurrent_operations, 3);
        assert_eq!(config.rate_limiting.firebase_operations, 5);
        assert_eq!(config.rate_limiting.import_operations, 2);
        assert_eq!(config.monitoring.alert_threshold, 70.0);
        assert_eq!(config.monitoring.metrics_retention_hours, 24);
        assert_eq!(config.cache.pattern_eviction, PatternEviction::Prefix);
        assert_eq!(config.counter_store.backend, CounterBackend::Memory);
    }

    /// Test that the default configuration is valid
    #[test]
    fn test_default_config_is_valid() {
        assert!(GuardConfig::default().validate().is_ok());
    }

    // ==================== Invalid values ====================

    /// Test that port 0 fails validation
    #[test]
    fn test_port_zero() {
        let mut config = GuardConfig::default();
        config.server.port = 0;

        let result = config.validate();
        assert!(result.unwrap_err().contains("port"));
    }

    /// Test that the redis backend needs a URL
    #[test]
    fn test_redis_backend_requires_url() {
        let mut config = GuardConfig::default();
        config.counter_store.backend = CounterBackend::Redis;
        assert!(config.validate().unwrap_err().contains("redis_url"));

        config.counter_store.redis_url = Some("http://localhost".to_string());
        assert!(config.validate().unwrap_err().contains("Invalid Redis URL"));

        config.counter_store.redis_url = Some("redis://localhost:6379".to_string());
        assert!(config.validate().is_ok());
    }

    /// Test that the warning threshold must sit below the error threshold
    #[test]
    fn test_memory_thresholds_ordered() {
        let mut config = GuardConfig::default();
        config.memory.max_usage_percent = 90.0;
        assert!(config.validate().is_err());
    }

    /// Test that a zero concurrency limit is rejected
    #[test]
    fn test_zero_concurrency() {
        let mut config = GuardConfig::default();
        config.rate_limiting.concurrent_operations = 0;
        assert!(config.validate().is_err());
    }

    // ==================== File loading ====================

    /// Test that omitted sections fall back to defaults
    #[tokio::test]
    async fn test_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"monitoring:\n  alert_threshold: 75\n").unwrap();

        let config = Config::from_file(file.path()).await.unwrap();
        assert_eq!(config.monitoring().alert_threshold, 75.0);
        assert_eq!(config.rate_limiting().concurrent_operations, 3);
    }

    /// Test that an invalid file is reported as a configuration error
    #[tokio::test]
    async fn test_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"server:\n  port: 0\n").unwrap();

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Invalid configuration"));
    }

    /// Test that a missing file falls back to defaults
    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let config = Config::load("does/not/exist.yaml").await.unwrap();
        assert_eq!(config.server().port, GuardConfig::default().server.port);
    }
}
