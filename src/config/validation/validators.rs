//! Configuration validators

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::{debug, warn};

/// Retries a background job may get after its first attempt
const MAX_JOB_RETRIES: u32 = 3;

impl Validate for AdminConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating admin configuration");

        self.server
            .validate()
            .map_err(|e| format!("Server config error: {}", e))?;
        self.storage
            .validate()
            .map_err(|e| format!("Storage config error: {}", e))?;
        self.bulk
            .validate()
            .map_err(|e| format!("Bulk config error: {}", e))?;
        self.worker
            .validate()
            .map_err(|e| format!("Worker config error: {}", e))?;

        Ok(())
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.host.is_empty() {
            return Err("Server host cannot be empty".to_string());
        }

        if self.port == 0 {
            return Err("Server port must be greater than 0".to_string());
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err("Server workers must be greater than 0".to_string());
            }
        }

        if self.max_body_size == 0 {
            return Err("Max body size must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), String> {
        self.database.validate()?;
        self.redis.validate()
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), String> {
        if self.url.is_empty() {
            return Err("Database URL cannot be empty".to_string());
        }

        let supported = ["sqlite:", "postgres://", "postgresql://"];
        if !supported.iter().any(|prefix| self.url.starts_with(prefix)) {
            return Err("Database URL must be a sqlite: or postgres:// URL".to_string());
        }

        if self.max_connections == 0 {
            return Err("Database max connections must be greater than 0".to_string());
        }

        if self.connection_timeout == 0 {
            return Err("Database connection timeout must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for RedisConfig {
    fn validate(&self) -> Result<(), String> {
        if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
            return Err("Redis URL must start with redis:// or rediss://".to_string());
        }
        Ok(())
    }
}

impl Validate for BulkSettings {
    fn validate(&self) -> Result<(), String> {
        if self.max_batch_size == 0 {
            return Err("max_batch_size must be greater than 0".to_string());
        }

        if self.async_threshold == 0 {
            return Err("async_threshold must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for BulkConfig {
    fn validate(&self) -> Result<(), String> {
        self.defaults
            .validate()
            .map_err(|e| format!("defaults: {}", e))?;

        for (label, settings) in &self.resources {
            settings.validate().map_err(|e| format!("{}: {}", label, e))?;

            if settings.async_threshold > settings.max_batch_size {
                warn!(
                    resource = %label,
                    async_threshold = settings.async_threshold,
                    max_batch_size = settings.max_batch_size,
                    "async_threshold exceeds max_batch_size, bulk actions will never run in the background"
                );
            }
        }

        Ok(())
    }
}

impl Validate for WorkerConfig {
    fn validate(&self) -> Result<(), String> {
        if self.concurrency == 0 {
            return Err("Worker concurrency must be greater than 0".to_string());
        }

        if self.queue == QueueBackend::InProcess && self.queue_capacity == 0 {
            return Err("In-process queue capacity must be greater than 0".to_string());
        }

        if self.queue == QueueBackend::Redis && self.queue_key.is_empty() {
            return Err("Redis queue key cannot be empty".to_string());
        }

        if self.queue == QueueBackend::InProcess && !self.embedded {
            return Err("The in-process queue requires embedded workers".to_string());
        }

        self.retry.validate()
    }
}

impl Validate for RetrySettings {
    fn validate(&self) -> Result<(), String> {
        if self.max_retries > MAX_JOB_RETRIES {
            return Err(format!(
                "Retry max_retries cannot exceed {}",
                MAX_JOB_RETRIES
            ));
        }

        if self.backoff_multiplier < 1.0 {
            return Err("Retry backoff multiplier must be at least 1.0".to_string());
        }

        if self.initial_delay_ms > self.max_delay_ms {
            return Err("Retry initial delay cannot exceed the maximum delay".to_string());
        }

        Ok(())
    }
}
