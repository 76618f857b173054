//! Core error type definitions

use thiserror::Error;

/// Result type alias for the resource guard
pub type Result<T> = std::result::Result<T, GuardError>;

/// Main error type for the resource guard
#[derive(Error, Debug)]
pub enum GuardError {
    /// Configuration errors (missing credentials, invalid thresholds)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Storage or cache unreachable
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// Admission rejected by a concurrency or rate gate
    #[error("Rate limit exceeded: {message}")]
    RateLimit {
        message: String,
        /// Machine-readable reason, e.g. `too_many_concurrent_operations`
        reason: &'static str,
        /// Suggested retry delay in seconds
        retry_after: u64,
    },

    /// Malformed input to a guarded endpoint
    #[error("Validation error: {0}")]
    Validation(String),

    /// Unit of work exceeded its execution budget
    #[error("Timeout error: {0}")]
    Timeout(String),

    /// Unexpected failures
    #[error("Internal server error: {0}")]
    Internal(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Redis errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}
