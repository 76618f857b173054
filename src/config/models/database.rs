//! Database configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Database connection and query settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Database URL
    #[serde(default = "default_database_url")]
    pub url: String,
    /// Batch size for bulk writes
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    /// Query timeout in seconds
    #[serde(default = "default_query_timeout")]
    pub query_timeout: u64,
    /// Maximum pooled connections
    #[serde(default = "default_connection_pool_size")]
    pub connection_pool_size: u32,
    #[serde(default = "default_true")]
    pub enable_query_caching: bool,
    /// Query cache TTL in seconds
    #[serde(default = "default_db_cache_ttl")]
    pub cache_ttl: u64,
    /// Statements run by `optimize`; backend defaults are used when empty
    #[serde(default)]
    pub maintenance_statements: Vec<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            batch_size: default_batch_size(),
            query_timeout: default_query_timeout(),
            connection_pool_size: default_connection_pool_size(),
            enable_query_caching: true,
            cache_ttl: default_db_cache_ttl(),
            maintenance_statements: Vec::new(),
        }
    }
}
