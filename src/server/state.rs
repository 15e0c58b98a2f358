//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::storage::StorageLayer;
use std::sync::Arc;

/// HTTP server state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Storage layer
    pub storage: Arc<StorageLayer>,
    /// Backend of the attached bulk job queue, if any
    pub queue: Option<&'static str>,
}

impl AppState {
    pub fn new(config: Config, storage: StorageLayer, queue: Option<&'static str>) -> Self {
        Self {
            config: Arc::new(config),
            storage: Arc::new(storage),
            queue,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}
