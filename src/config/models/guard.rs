//! Root configuration for the resource guard

use super::*;
use crate::utils::config::ConfigUtils;
use serde::{Deserialize, Serialize};

/// Root configuration; every section falls back to its defaults when omitted
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GuardConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub counter_store: CounterStoreConfig,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub firebase: FirebaseConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub rate_limiting: RateLimitingConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub emergency: EmergencyConfig,
    #[serde(default)]
    pub limits: ExecutionLimitsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GuardConfig {
    /// Build a configuration from defaults plus environment overrides
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Apply the environment overrides understood by the guard.
    ///
    /// Unset or unparsable variables leave the current value untouched.
    pub fn apply_env_overrides(&mut self) {
        let memory = &mut self.memory;
        memory.max_usage_percent =
            ConfigUtils::get_numeric_config("MEMORY_MAX_USAGE_PERCENT", memory.max_usage_percent);
        memory.emergency_cleanup_threshold = ConfigUtils::get_numeric_config(
            "MEMORY_EMERGENCY_THRESHOLD",
            memory.emergency_cleanup_threshold,
        );
        memory.chunk_size = ConfigUtils::get_numeric_config("MEMORY_CHUNK_SIZE", memory.chunk_size);
        memory.max_memory_limit_mb =
            ConfigUtils::get_numeric_config("MEMORY_MAX_LIMIT", memory.max_memory_limit_mb);

        let database = &mut self.database;
        if let Some(url) = ConfigUtils::get_env_var("DATABASE_URL") {
            database.url = url;
        }
        database.batch_size = ConfigUtils::get_numeric_config("DB_BATCH_SIZE", database.batch_size);
        database.query_timeout =
            ConfigUtils::get_numeric_config("DB_QUERY_TIMEOUT", database.query_timeout);
        database.connection_pool_size =
            ConfigUtils::get_numeric_config("DB_POOL_SIZE", database.connection_pool_size);
        database.enable_query_caching =
            ConfigUtils::get_bool_config("DB_QUERY_CACHING", database.enable_query_caching);
        database.cache_ttl = ConfigUtils::get_numeric_config("DB_CACHE_TTL", database.cache_ttl);

        let firebase = &mut self.firebase;
        firebase.rate_limit_per_minute =
            ConfigUtils::get_numeric_config("FIREBASE_RATE_LIMIT", firebase.rate_limit_per_minute);
        firebase.timeout = ConfigUtils::get_numeric_config("FIREBASE_TIMEOUT", firebase.timeout);
        firebase.retry_attempts =
            ConfigUtils::get_numeric_config("FIREBASE_RETRY_ATTEMPTS", firebase.retry_attempts);
        firebase.batch_size =
            ConfigUtils::get_numeric_config("FIREBASE_BATCH_SIZE", firebase.batch_size);

        let rate = &mut self.rate_limiting;
        rate.concurrent_operations =
            ConfigUtils::get_numeric_config("RATE_LIMIT_CONCURRENT", rate.concurrent_operations);
        rate.firebase_operations =
            ConfigUtils::get_numeric_config("RATE_LIMIT_FIREBASE", rate.firebase_operations);
        rate.import_operations =
            ConfigUtils::get_numeric_config("RATE_LIMIT_IMPORT", rate.import_operations);
        rate.timeout = ConfigUtils::get_numeric_config("RATE_LIMIT_TIMEOUT", rate.timeout);

        let monitoring = &mut self.monitoring;
        monitoring.enable_resource_monitoring = ConfigUtils::get_bool_config(
            "MONITORING_ENABLED",
            monitoring.enable_resource_monitoring,
        );
        monitoring.log_high_memory_usage =
            ConfigUtils::get_bool_config("MONITORING_LOG_MEMORY", monitoring.log_high_memory_usage);
        monitoring.alert_threshold =
            ConfigUtils::get_numeric_config("MONITORING_ALERT_THRESHOLD", monitoring.alert_threshold);
        monitoring.metrics_retention_hours = ConfigUtils::get_numeric_config(
            "MONITORING_RETENTION",
            monitoring.metrics_retention_hours,
        );

        let emergency = &mut self.emergency;
        emergency.auto_cleanup =
            ConfigUtils::get_bool_config("EMERGENCY_AUTO_CLEANUP", emergency.auto_cleanup);
        emergency.cache_flush =
            ConfigUtils::get_bool_config("EMERGENCY_CACHE_FLUSH", emergency.cache_flush);
        emergency.session_cleanup =
            ConfigUtils::get_bool_config("EMERGENCY_SESSION_CLEANUP", emergency.session_cleanup);

        if let Some(url) = ConfigUtils::get_env_var("REDIS_URL") {
            self.counter_store.backend = CounterBackend::Redis;
            self.counter_store.redis_url = Some(url);
        }
        if let Some(level) = ConfigUtils::get_env_var("LOG_LEVEL") {
            self.logging.level = level;
        }
    }
}
