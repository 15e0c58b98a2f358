//! Storage layer for the admin back-end
//!
//! Relational storage through SeaORM, plus the Redis connection backing the durable job queue.

/// Database storage module
pub mod database;
/// Redis connectivity module
#[cfg(feature = "redis")]
pub mod redis;

use crate::config::StorageConfig;
use crate::utils::error::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Storage backends shared by the server and the worker
#[derive(Debug, Clone)]
pub struct StorageLayer {
    /// Database connection pool
    pub database: Arc<database::Database>,
    /// Redis pool, present only when the Redis queue is in use
    #[cfg(feature = "redis")]
    pub redis: Option<Arc<redis::RedisPool>>,
}

/// Result of probing every configured backend
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StorageHealthStatus {
    pub database: bool,
    /// `None` when Redis is not configured
    pub redis: Option<bool>,
    pub overall: bool,
}

impl StorageLayer {
    /// Connect to the database, and to Redis when `with_redis` is set
    pub async fn new(config: &StorageConfig, with_redis: bool) -> Result<Self> {
        info!("Initializing storage layer");
        let database = Arc::new(database::Database::new(&config.database).await?);

        #[cfg(feature = "redis")]
        let redis = if with_redis {
            Some(Arc::new(redis::RedisPool::new(&config.redis).await?))
        } else {
            None
        };
        #[cfg(not(feature = "redis"))]
        if with_redis {
            return Err(crate::utils::error::AdminError::config(
                "Redis queue requested but the `redis` feature is disabled",
            ));
        }

        info!("Storage layer initialized successfully");
        Ok(Self {
            database,
            #[cfg(feature = "redis")]
            redis,
        })
    }

    /// Wrap an already connected database, without Redis
    pub fn from_database(database: database::Database) -> Self {
        Self {
            database: Arc::new(database),
            #[cfg(feature = "redis")]
            redis: None,
        }
    }

    /// Run database migrations
    pub async fn migrate(&self) -> Result<()> {
        self.database.migrate().await
    }

    /// Health check for all configured backends
    pub async fn health_check(&self) -> StorageHealthStatus {
        let database = match self.database.health_check().await {
            Ok(()) => true,
            Err(e) => {
                warn!("Database health check failed: {}", e);
                false
            }
        };

        #[cfg(feature = "redis")]
        let redis = match &self.redis {
            Some(pool) => Some(match pool.health_check().await {
                Ok(()) => true,
                Err(e) => {
                    warn!("Redis health check failed: {}", e);
                    false
                }
            }),
            None => None,
        };
        #[cfg(not(feature = "redis"))]
        let redis = None;

        StorageHealthStatus {
            database,
            redis,
            overall: database && redis.unwrap_or(true),
        }
    }

    /// Get database handle
    pub fn db(&self) -> &database::Database {
        &self.database
    }
}
