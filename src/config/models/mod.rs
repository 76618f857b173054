//! Configuration data models
//!
//! This module defines all configuration structures used by the resource guard.
//! Section names and defaults mirror the `optimization` settings the guard was
//! introduced with, so existing environment overrides keep working.

#![allow(missing_docs)]

pub mod cache;
pub mod counter_store;
pub mod database;
pub mod emergency;
pub mod firebase;
pub mod guard;
pub mod limits;
pub mod logging;
pub mod memory;
pub mod monitoring;
pub mod rate_limit;
pub mod server;

// Re-export all configuration types
pub use cache::*;
pub use counter_store::*;
pub use database::*;
pub use emergency::*;
pub use firebase::*;
pub use guard::*;
pub use limits::*;
pub use logging::*;
pub use memory::*;
pub use monitoring::*;
pub use rate_limit::*;
pub use server::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

pub fn default_true() -> bool {
    true
}

pub fn default_health_rpm() -> u32 {
    60
}

pub fn default_optimization_rpm() -> u32 {
    20
}

pub fn default_max_usage_percent() -> f64 {
    60.0
}

pub fn default_emergency_cleanup_threshold() -> f64 {
    80.0
}

pub fn default_chunk_size() -> usize {
    25
}

pub fn default_max_memory_limit_mb() -> u64 {
    128
}

pub fn default_database_url() -> String {
    "sqlite::memory:".to_string()
}

pub fn default_batch_size() -> usize {
    50
}

pub fn default_query_timeout() -> u64 {
    10
}

pub fn default_connection_pool_size() -> u32 {
    5
}

pub fn default_db_cache_ttl() -> u64 {
    300
}

pub fn default_firebase_rate_limit() -> u32 {
    3
}

pub fn default_firebase_timeout() -> u64 {
    10
}

pub fn default_retry_attempts() -> u32 {
    2
}

pub fn default_firebase_batch_size() -> usize {
    10
}

pub fn default_concurrent_operations() -> i64 {
    3
}

pub fn default_firebase_operations() -> i64 {
    5
}

pub fn default_import_operations() -> i64 {
    2
}

pub fn default_rate_window_secs() -> u64 {
    60
}

pub fn default_alert_threshold() -> f64 {
    70.0
}

pub fn default_retention_hours() -> u32 {
    24
}

pub fn default_execution_timeout() -> u64 {
    25
}

pub fn default_input_timeout() -> u64 {
    20
}

pub fn default_socket_timeout() -> u64 {
    15
}

pub fn default_concurrency_ttl() -> u64 {
    60
}

pub fn default_sweep_interval() -> u64 {
    60
}

pub fn default_log_level() -> String {
    "info".to_string()
}
