//! Configuration data models
//!
//! This module defines all configuration structures used throughout the service.

#![allow(missing_docs)]

pub mod admin;
pub mod bulk;
pub mod logging;
pub mod server;
pub mod storage;
pub mod worker;

// Re-export all configuration types
pub use admin::*;
pub use bulk::*;
pub use logging::*;
pub use server::*;
pub use storage::*;
pub use worker::*;

/// Default values for configuration
pub fn default_host() -> String {
    "0.0.0.0".to_string()
}

/// Default server port
pub fn default_port() -> u16 {
    8000
}

/// Default maximum body size in bytes
pub fn default_max_body_size() -> usize {
    2 * 1024 * 1024 // 2MB
}

/// Default database URL
pub fn default_database_url() -> String {
    "sqlite://data/admin.db?mode=rwc".to_string()
}

/// Default maximum database connections
pub fn default_max_connections() -> u32 {
    10
}

/// Default connection timeout in seconds
pub fn default_connection_timeout() -> u64 {
    5
}

/// Default Redis URL
pub fn default_redis_url() -> String {
    "redis://127.0.0.1:6379".to_string()
}

/// Default bulk batch ceiling
pub fn default_max_batch_size() -> usize {
    100
}

/// Default size at which bulk actions move to the background worker
pub fn default_async_threshold() -> usize {
    50
}

/// Default worker concurrency
pub fn default_worker_concurrency() -> usize {
    4
}

/// Default in-process queue capacity
pub fn default_queue_capacity() -> usize {
    1024
}

/// Default Redis list holding pending bulk jobs
pub fn default_queue_key() -> String {
    "admin:bulk_jobs".to_string()
}

/// Default maximum retries after the first failed attempt
pub fn default_max_retries() -> u32 {
    3
}

/// Default first retry delay in milliseconds
pub fn default_initial_delay_ms() -> u64 {
    1_000
}

/// Default retry delay ceiling in milliseconds
pub fn default_max_delay_ms() -> u64 {
    60_000
}

/// Default backoff multiplier
pub fn default_backoff_multiplier() -> f64 {
    2.0
}

/// Default log level directive
pub fn default_log_level() -> String {
    "info".to_string()
}

pub fn default_true() -> bool {
    true
}
