//! Background worker configuration

use super::*;
use crate::utils::error::RetryConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Which queue carries bulk jobs to the worker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QueueBackend {
    /// Bounded channel inside the server process
    #[default]
    InProcess,
    /// Redis list shared with `admin-bulk worker` processes
    Redis,
}

impl std::str::FromStr for QueueBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "in_process" | "in-process" | "memory" => Ok(Self::InProcess),
            "redis" => Ok(Self::Redis),
            other => Err(format!("Unknown queue backend: {}", other)),
        }
    }
}

/// Worker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    #[serde(default)]
    pub queue: QueueBackend,
    /// Jobs executed concurrently by one worker process
    #[serde(default = "default_worker_concurrency")]
    pub concurrency: usize,
    /// Capacity of the in-process channel
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
    /// Redis list key
    #[serde(default = "default_queue_key")]
    pub queue_key: String,
    /// Start consumers inside `serve`; disable when separate worker processes run
    #[serde(default = "default_true")]
    pub embedded: bool,
    #[serde(default)]
    pub retry: RetrySettings,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            queue: QueueBackend::default(),
            concurrency: default_worker_concurrency(),
            queue_capacity: default_queue_capacity(),
            queue_key: default_queue_key(),
            embedded: true,
            retry: RetrySettings::default(),
        }
    }
}

/// Retry configuration for failed jobs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrySettings {
    /// Retries after the first failed attempt
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Initial delay (milliseconds)
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,
    /// Maximum delay (milliseconds)
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
    /// Add random jitter
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

impl From<&RetrySettings> for RetryConfig {
    fn from(settings: &RetrySettings) -> Self {
        Self {
            max_attempts: settings.max_retries.saturating_add(1),
            base_delay: Duration::from_millis(settings.initial_delay_ms),
            max_delay: Duration::from_millis(settings.max_delay_ms),
            backoff_multiplier: settings.backoff_multiplier,
            jitter: settings.jitter,
        }
    }
}
