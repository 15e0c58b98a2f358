//! Server builder, resource wiring and the `serve` / `worker` entry points

use crate::config::{BulkConfig, Config, QueueBackend};
use crate::core::bulk::{BulkActionService, BulkWorker, TaskQueue, in_process};
use crate::server::actions::{ARCHIVE_ACTION, archive_families};
use crate::server::routes;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::storage::StorageLayer;
use crate::storage::database::{CARETAKERS, CaretakerResource, FAMILIES, FamilyResource};
use crate::utils::error::{AdminError, Result, RetryConfig};
use actix_web::web;
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// How long `serve` waits for queued jobs to finish after the HTTP server stops
const DRAIN_TIMEOUT: Duration = Duration::from_secs(30);

/// Bulk services for every resource exposed over HTTP
#[derive(Clone)]
pub struct BulkServices {
    pub families: Arc<BulkActionService<FamilyResource>>,
    pub caretakers: Arc<BulkActionService<CaretakerResource>>,
}

impl BulkServices {
    /// Build one service per resource with its configured thresholds
    pub fn new(
        db: &DatabaseConnection,
        bulk: &BulkConfig,
        queue: Option<Arc<dyn TaskQueue>>,
    ) -> Self {
        let mut families = BulkActionService::new(
            Arc::new(FamilyResource::new(db.clone(), FAMILIES)),
            bulk.for_resource(FAMILIES),
        )
        .with_custom_action(ARCHIVE_ACTION, archive_families);

        let mut caretakers = BulkActionService::new(
            Arc::new(CaretakerResource::new(db.clone(), CARETAKERS)),
            bulk.for_resource(CARETAKERS),
        );

        if let Some(queue) = queue {
            families = families.with_queue(Arc::clone(&queue));
            caretakers = caretakers.with_queue(queue);
        }

        Self {
            families: Arc::new(families),
            caretakers: Arc::new(caretakers),
        }
    }

    /// Mount the bulk routes of every resource
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        routes::bulk::configure_resource(cfg, FAMILIES, Arc::clone(&self.families));
        routes::bulk::configure_resource(cfg, CARETAKERS, Arc::clone(&self.caretakers));
    }
}

/// Worker with a runner for every resource the server exposes
pub fn bulk_worker(db: &DatabaseConnection, retry: RetryConfig) -> BulkWorker {
    let mut worker = BulkWorker::new(retry);
    worker
        .register(Arc::new(FamilyResource::new(db.clone(), FAMILIES)))
        .register(Arc::new(CaretakerResource::new(db.clone(), CARETAKERS)));
    worker
}

/// Worker task running inside the server process
pub(crate) struct EmbeddedWorker {
    handle: JoinHandle<Result<()>>,
    /// Whether the job source closes once producers are gone
    drains: bool,
}

impl EmbeddedWorker {
    pub(crate) async fn shutdown(self) -> Result<()> {
        if !self.drains {
            self.handle.abort();
            return Ok(());
        }

        match tokio::time::timeout(DRAIN_TIMEOUT, self.handle).await {
            Ok(joined) => joined?,
            Err(_) => {
                warn!("Bulk worker did not drain within {:?}", DRAIN_TIMEOUT);
                Ok(())
            }
        }
    }
}

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Connect storage, run migrations, attach the queue and build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| AdminError::config("Configuration is required"))?;
        let worker_config = config.worker().clone();

        let storage =
            StorageLayer::new(config.storage(), worker_config.queue == QueueBackend::Redis).await?;
        storage.migrate().await?;
        let db = storage.db().connection().clone();
        let retry = RetryConfig::from(&worker_config.retry);

        let (queue, worker): (Arc<dyn TaskQueue>, Option<EmbeddedWorker>) =
            match worker_config.queue {
                QueueBackend::InProcess => {
                    let (queue, source) = in_process(worker_config.queue_capacity);
                    let worker = Arc::new(bulk_worker(&db, retry));
                    let handle = tokio::spawn(worker.run(source, worker_config.concurrency));
                    (
                        Arc::new(queue),
                        Some(EmbeddedWorker {
                            handle,
                            drains: true,
                        }),
                    )
                }
                #[cfg(feature = "redis")]
                QueueBackend::Redis => {
                    let pool = storage
                        .redis
                        .as_deref()
                        .cloned()
                        .ok_or_else(|| AdminError::config("Redis queue selected but not connected"))?;
                    let queue = crate::core::bulk::RedisQueue::new(pool, &worker_config.queue_key);
                    let worker = if worker_config.embedded {
                        let source = queue.source().await?;
                        let worker = Arc::new(bulk_worker(&db, retry));
                        Some(EmbeddedWorker {
                            handle: tokio::spawn(worker.run(source, worker_config.concurrency)),
                            drains: false,
                        })
                    } else {
                        None
                    };
                    (Arc::new(queue), worker)
                }
                #[cfg(not(feature = "redis"))]
                QueueBackend::Redis => {
                    return Err(AdminError::config(
                        "Redis queue requested but the `redis` feature is disabled",
                    ));
                }
            };

        info!(
            queue = queue.name(),
            embedded_worker = worker.is_some(),
            "Bulk job queue attached"
        );

        let services = BulkServices::new(&db, config.bulk(), Some(Arc::clone(&queue)));
        let state = AppState::new(config, storage, Some(queue.name()));
        Ok(HttpServer::new(state, services, worker))
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the HTTP server with an embedded or external worker
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting admin bulk service");
    let server = ServerBuilder::new().with_config(config).build().await?;

    info!("API Endpoints:");
    info!("   GET  /health");
    for label in [FAMILIES, CARETAKERS] {
        info!("   POST /api/v1/{}/bulk-delete", label);
        info!("   POST /api/v1/{}/bulk-update", label);
        info!("   POST /api/v1/{}/bulk-actions/{{name}}", label);
    }

    server.start().await
}

/// Run a standalone worker consuming the Redis queue until interrupted
pub async fn run_worker(config: Config) -> Result<()> {
    if config.worker().queue != QueueBackend::Redis {
        return Err(AdminError::config(
            "A standalone worker needs `worker.queue: redis`; the in_process queue only runs inside `serve`",
        ));
    }

    run_redis_worker(config).await
}

#[cfg(feature = "redis")]
async fn run_redis_worker(config: Config) -> Result<()> {
    let worker_config = config.worker();
    let storage = StorageLayer::new(config.storage(), true).await?;
    let pool = storage
        .redis
        .as_deref()
        .cloned()
        .ok_or_else(|| AdminError::config("Redis is not connected"))?;
    let queue = crate::core::bulk::RedisQueue::new(pool, &worker_config.queue_key);
    let source = queue.source().await?;
    let worker = Arc::new(bulk_worker(
        storage.db().connection(),
        RetryConfig::from(&worker_config.retry),
    ));

    tokio::select! {
        result = worker.run(source, worker_config.concurrency) => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received, stopping worker");
            Ok(())
        }
    }
}

#[cfg(not(feature = "redis"))]
async fn run_redis_worker(_config: Config) -> Result<()> {
    Err(AdminError::config(
        "Redis queue requested but the `redis` feature is disabled",
    ))
}
