//! Configuration management for the resource guard
//!
//! This module handles loading, validation, and management of all guard configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{GuardError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "config/guard.yaml";

/// Main configuration struct for the resource guard
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub guard: GuardConfig,
}

impl Config {
    /// Load configuration from a YAML file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| GuardError::Config(format!("Failed to read config file: {}", e)))?;

        let mut guard: GuardConfig = serde_yaml::from_str(&content)
            .map_err(|e| GuardError::Config(format!("Failed to parse config: {}", e)))?;
        guard.apply_env_overrides();

        let config = Self { guard };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            guard: GuardConfig::from_env(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise from the environment
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path).await
        } else {
            info!(
                "Configuration file {:?} not found, using defaults and environment",
                path.as_ref()
            );
            Self::from_env()
        }
    }

    pub fn server(&self) -> &ServerConfig {
        &self.guard.server
    }

    pub fn memory(&self) -> &MemoryConfig {
        &self.guard.memory
    }

    pub fn rate_limiting(&self) -> &RateLimitingConfig {
        &self.guard.rate_limiting
    }

    pub fn monitoring(&self) -> &MonitoringConfig {
        &self.guard.monitoring
    }

    pub fn limits(&self) -> &ExecutionLimitsConfig {
        &self.guard.limits
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        self.guard
            .validate()
            .map_err(|e| GuardError::Config(format!("Invalid configuration: {}", e)))
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.guard)
            .map_err(|e| GuardError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
