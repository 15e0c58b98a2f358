//! Top-level service configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Service configuration as read from the YAML file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,
    /// Bulk action thresholds
    #[serde(default)]
    pub bulk: BulkConfig,
    /// Background worker configuration
    #[serde(default)]
    pub worker: WorkerConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}
