//! Bulk action thresholds

use super::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-resource bulk tuning handed to a `BulkActionService`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkSettings {
    /// Largest accepted id count per request
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
    /// Id count at or above which delete/update run on the worker
    #[serde(default = "default_async_threshold")]
    pub async_threshold: usize,
}

impl Default for BulkSettings {
    fn default() -> Self {
        Self {
            max_batch_size: default_max_batch_size(),
            async_threshold: default_async_threshold(),
        }
    }
}

impl BulkSettings {
    pub fn new(max_batch_size: usize, async_threshold: usize) -> Self {
        Self {
            max_batch_size,
            async_threshold,
        }
    }
}

/// Bulk configuration: global defaults plus overrides keyed by resource label
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BulkConfig {
    #[serde(default)]
    pub defaults: BulkSettings,
    #[serde(default)]
    pub resources: HashMap<String, BulkSettings>,
}

impl BulkConfig {
    /// Settings for a resource, falling back to the defaults
    pub fn for_resource(&self, label: &str) -> BulkSettings {
        self.resources.get(label).copied().unwrap_or(self.defaults)
    }
}
