//! Validators for the guard configuration sections

use super::trait_def::Validate;
use crate::config::models::*;
use crate::core::admission::CONCURRENCY_PREFIX;
use tracing::debug;

impl Validate for GuardConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating guard configuration");

        self.server.validate()?;
        self.counter_store.validate()?;
        self.memory.validate()?;
        self.database.validate()?;
        self.cache.validate()?;
        self.rate_limiting.validate()?;
        self.monitoring.validate()?;
        self.limits.validate()?;

        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }
        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }
        if self.workers == Some(0) {
            return Err("Worker count must be greater than 0".to_string());
        }
        if self.health_rpm == 0 || self.optimization_rpm == 0 {
            return Err("Route rate limits must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for CounterStoreConfig {
    fn validate(&self) -> Result<(), String> {
        if self.backend == CounterBackend::Redis {
            match &self.redis_url {
                None => {
                    return Err("redis_url is required for the redis counter backend".to_string());
                }
                Some(url) if !url.starts_with("redis://") && !url.starts_with("rediss://") => {
                    return Err(format!("Invalid Redis URL: {}", url));
                }
                _ => {}
            }
        }
        if self.sweep_interval_secs == 0 {
            return Err("sweep_interval_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for MemoryConfig {
    fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("max_usage_percent", self.max_usage_percent),
            ("emergency_cleanup_threshold", self.emergency_cleanup_threshold),
        ] {
            if !(0.0..=100.0).contains(&value) {
                return Err(format!("{} must be between 0 and 100, got {}", name, value));
            }
        }
        if self.max_usage_percent > self.emergency_cleanup_threshold {
            return Err(
                "max_usage_percent cannot exceed emergency_cleanup_threshold".to_string(),
            );
        }
        if self.max_memory_limit_mb == 0 {
            return Err("max_memory_limit_mb must be greater than 0".to_string());
        }
        if self.chunk_size == 0 {
            return Err("chunk_size must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }
        if self.connection_pool_size == 0 {
            return Err("connection_pool_size must be greater than 0".to_string());
        }
        if self.batch_size == 0 {
            return Err("batch_size must be greater than 0".to_string());
        }
        if self.query_timeout == 0 {
            return Err("query_timeout must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> Result<(), String> {
        let all = self.pressure_patterns.iter().chain(&self.cleanup_patterns);
        for pattern in all {
            let prefix = pattern.trim_end_matches('*');
            if prefix.is_empty() {
                return Err(format!(
                    "Cache pattern '{}' would match every key; use an explicit flush instead",
                    pattern
                ));
            }
            // Slots held by in-flight requests must survive eviction
            let hits_slots =
                CONCURRENCY_PREFIX.starts_with(prefix) || prefix.starts_with(CONCURRENCY_PREFIX);
            if self.pattern_eviction == PatternEviction::Prefix && hits_slots {
                return Err(format!(
                    "Cache pattern '{}' would evict concurrency counters held by in-flight requests",
                    pattern
                ));
            }
        }
        Ok(())
    }
}

impl Validate for RateLimitingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.concurrent_operations <= 0 {
            return Err("concurrent_operations must be greater than 0".to_string());
        }
        if self.firebase_operations <= 0 || self.import_operations <= 0 {
            return Err("Operation rate limits must be greater than 0".to_string());
        }
        if self.timeout == 0 {
            return Err("Rate limit window must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for MonitoringConfig {
    fn validate(&self) -> Result<(), String> {
        if !(0.0..=100.0).contains(&self.alert_threshold) {
            return Err(format!(
                "alert_threshold must be between 0 and 100, got {}",
                self.alert_threshold
            ));
        }
        if self.metrics_retention_hours == 0 {
            return Err("metrics_retention_hours must be greater than 0".to_string());
        }
        Ok(())
    }
}

impl Validate for ExecutionLimitsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.execution_timeout_secs == 0
            || self.input_timeout_secs == 0
            || self.socket_timeout_secs == 0
        {
            return Err("Execution limits must be greater than 0".to_string());
        }
        if self.concurrency_ttl_secs == 0 {
            return Err("concurrency_ttl_secs must be greater than 0".to_string());
        }
        Ok(())
    }
}
