//! Server configuration

use super::*;
use serde::{Deserialize, Serialize};

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host
    #[serde(default = "default_host")]
    pub host: String,
    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Number of worker threads
    pub workers: Option<usize>,
    /// Use the forwarded-for address as client identity (only behind a trusted proxy)
    #[serde(default)]
    pub trust_forwarded_for: bool,
    /// Requests per minute per client on the `/health` scope
    #[serde(default = "default_health_rpm")]
    pub health_rpm: u32,
    /// Requests per minute per client on the `/optimization` scope
    #[serde(default = "default_optimization_rpm")]
    pub optimization_rpm: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            trust_forwarded_for: false,
            health_rpm: default_health_rpm(),
            optimization_rpm: default_optimization_rpm(),
        }
    }
}

impl ServerConfig {
    /// Get the server address
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
