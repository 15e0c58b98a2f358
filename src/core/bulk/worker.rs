//! Background worker executing deferred bulk jobs

use super::queue::JobSource;
use super::resource::{BulkId, BulkResource};
use super::types::{BulkAction, BulkJob};
use crate::utils::error::{AdminError, BulkValidationError, Result, RetryConfig, RetryPolicy};
use crate::utils::summarize_ids;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::{error, info, warn};

/// Executes one job against a concrete resource
#[async_trait]
pub trait JobRunner: Send + Sync {
    async fn run(&self, job: &BulkJob) -> Result<u64>;
}

/// Runs jobs against a `BulkResource`, re-resolving the id set at execution time
pub struct ResourceJobRunner<R: BulkResource> {
    resource: Arc<R>,
}

impl<R: BulkResource> ResourceJobRunner<R> {
    pub fn new(resource: Arc<R>) -> Self {
        Self { resource }
    }

    fn parse_ids(job: &BulkJob) -> Result<Vec<R::Id>> {
        job.ids
            .iter()
            .map(|raw| {
                R::Id::parse_id(raw)
                    .map_err(|e| AdminError::invalid_job(format!("invalid id '{}': {}", raw, e)))
            })
            .collect()
    }
}

#[async_trait]
impl<R: BulkResource> JobRunner for ResourceJobRunner<R> {
    async fn run(&self, job: &BulkJob) -> Result<u64> {
        let ids = Self::parse_ids(job)?;
        match job.action {
            BulkAction::Delete => self.resource.delete_matching(&ids).await,
            BulkAction::Update => {
                let payload = job
                    .payload
                    .as_ref()
                    .filter(|payload| !payload.is_empty())
                    .ok_or(BulkValidationError::MissingPayload)?;
                self.resource.update_matching(&ids, payload).await
            }
            BulkAction::Custom => Err(AdminError::UnsupportedAction(job.action.to_string())),
        }
    }
}

/// Registry of job runners keyed by resource label, with retry on transient failures
pub struct BulkWorker {
    runners: HashMap<String, Arc<dyn JobRunner>>,
    retry: RetryPolicy,
}

impl BulkWorker {
    pub fn new(retry: RetryConfig) -> Self {
        Self {
            runners: HashMap::new(),
            retry: RetryPolicy::new(retry),
        }
    }

    /// Register a resource under its own label
    pub fn register<R: BulkResource>(&mut self, resource: Arc<R>) -> &mut Self {
        let label = resource.label().to_string();
        self.register_runner(label, Arc::new(ResourceJobRunner::new(resource)))
    }

    pub fn register_runner(
        &mut self,
        label: impl Into<String>,
        runner: Arc<dyn JobRunner>,
    ) -> &mut Self {
        self.runners.insert(label.into(), runner);
        self
    }

    pub fn labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = self.runners.keys().map(String::as_str).collect();
        labels.sort_unstable();
        labels
    }

    /// Execute a job, retrying transient failures with exponential backoff.
    ///
    /// The final error is returned so the consuming loop can record the job as failed.
    pub async fn execute(&self, job: &BulkJob) -> Result<u64> {
        let Some(runner) = self.runners.get(&job.resource) else {
            error!(
                job_id = %job.job_id,
                resource = %job.resource,
                action = %job.action,
                "No runner registered for bulk job"
            );
            return Err(AdminError::UnknownResource(job.resource.clone()));
        };

        let outcome = self
            .retry
            .call_if(AdminError::is_retryable, || runner.run(job))
            .await;

        match outcome {
            Ok(done) => {
                info!(
                    job_id = %job.job_id,
                    resource = %job.resource,
                    action = %job.action,
                    affected = done.value,
                    attempts = done.attempts,
                    "Bulk job completed"
                );
                Ok(done.value)
            }
            Err(failed) => {
                error!(
                    job_id = %job.job_id,
                    resource = %job.resource,
                    action = %job.action,
                    ids = %summarize_ids(&job.ids, 20),
                    attempts = failed.attempts,
                    error = %failed.value,
                    "Bulk job failed"
                );
                Err(failed.value)
            }
        }
    }

    /// Consume jobs until the source closes, running at most `concurrency` at a time
    pub async fn run<S: JobSource>(self: Arc<Self>, mut source: S, concurrency: usize) -> Result<()> {
        let permits = Arc::new(Semaphore::new(concurrency.max(1)));
        info!(
            concurrency,
            resources = ?self.labels(),
            "Bulk worker started"
        );

        loop {
            let job = match source.next_job().await {
                Ok(Some(job)) => job,
                Ok(None) => break,
                Err(e) => {
                    warn!(error = %e, "Failed to fetch bulk job, backing off");
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    continue;
                }
            };

            let permit = Arc::clone(&permits).acquire_owned().await?;
            let worker = Arc::clone(&self);
            tokio::spawn(async move {
                let _permit = permit;
                // Failures are already logged by `execute`
                let _ = worker.execute(&job).await;
            });
        }

        // Wait for in-flight jobs before reporting shutdown
        let _drained = permits.acquire_many(concurrency.max(1) as u32).await?;
        info!("Bulk worker stopped");
        Ok(())
    }
}
