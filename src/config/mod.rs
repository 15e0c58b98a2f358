//! Configuration management for the admin back-end
//!
//! This module handles loading, validation, and management of all service configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{AdminError, Result};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Service configuration
    pub admin: AdminConfig,
}

impl Config {
    /// Load configuration from file, then apply environment overrides
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AdminError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml_str(&content)?;
        config.apply_env_overrides()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse configuration from YAML without touching the environment
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let admin: AdminConfig = serde_yaml::from_str(content)
            .map_err(|e| AdminError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(Self { admin })
    }

    /// Load configuration from defaults and environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Override selected values from environment variables
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = env::var("ADMIN_HOST") {
            self.admin.server.host = host;
        }
        if let Ok(port) = env::var("ADMIN_PORT") {
            self.admin.server.port = port
                .parse()
                .map_err(|e| AdminError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Ok(db_url) = env::var("DATABASE_URL") {
            self.admin.storage.database.url = db_url;
        }
        if let Ok(redis_url) = env::var("REDIS_URL") {
            self.admin.storage.redis.url = redis_url;
        }
        if let Ok(queue) = env::var("BULK_QUEUE") {
            self.admin.worker.queue = queue.parse().map_err(AdminError::Config)?;
        }
        if let Ok(concurrency) = env::var("BULK_WORKER_CONCURRENCY") {
            self.admin.worker.concurrency = concurrency
                .parse()
                .map_err(|e| AdminError::Config(format!("Invalid worker concurrency: {}", e)))?;
        }
        Ok(())
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.admin.server
    }

    /// Get storage configuration
    pub fn storage(&self) -> &StorageConfig {
        &self.admin.storage
    }

    /// Get bulk configuration
    pub fn bulk(&self) -> &BulkConfig {
        &self.admin.bulk
    }

    /// Get worker configuration
    pub fn worker(&self) -> &WorkerConfig {
        &self.admin.worker
    }

    /// Get logging configuration
    pub fn logging(&self) -> &LoggingConfig {
        &self.admin.logging
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");
        Validate::validate(&self.admin).map_err(AdminError::Config)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.admin)
            .map_err(|e| AdminError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}
