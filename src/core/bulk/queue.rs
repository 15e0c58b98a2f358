//! Task queues carrying deferred bulk jobs to the worker

use super::types::BulkJob;
use crate::utils::error::Result;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::debug;

/// Submission side of a job queue
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Hand a job to the queue without waiting for it to run or for queue space
    async fn enqueue(&self, job: BulkJob) -> Result<()>;
}

/// Consuming side of a job queue
#[async_trait]
pub trait JobSource: Send {
    /// Next job, or `None` once the queue is closed
    async fn next_job(&mut self) -> Result<Option<BulkJob>>;
}

/// Create a bounded in-process queue
pub fn in_process(capacity: usize) -> (InProcessQueue, InProcessJobSource) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (InProcessQueue { sender }, InProcessJobSource { receiver })
}

/// Producer half of the in-process queue
#[derive(Debug, Clone)]
pub struct InProcessQueue {
    sender: mpsc::Sender<BulkJob>,
}

#[async_trait]
impl TaskQueue for InProcessQueue {
    fn name(&self) -> &'static str {
        "in_process"
    }

    async fn enqueue(&self, job: BulkJob) -> Result<()> {
        debug!(job_id = %job.job_id, "Enqueueing bulk job in process");
        self.sender.try_send(job)?;
        Ok(())
    }
}

/// Consumer half of the in-process queue; closes when every producer is dropped
#[derive(Debug)]
pub struct InProcessJobSource {
    receiver: mpsc::Receiver<BulkJob>,
}

#[async_trait]
impl JobSource for InProcessJobSource {
    async fn next_job(&mut self) -> Result<Option<BulkJob>> {
        Ok(self.receiver.recv().await)
    }
}

#[cfg(feature = "redis")]
pub use self::redis_queue::{RedisJobSource, RedisQueue};

#[cfg(feature = "redis")]
mod redis_queue {
    use super::{JobSource, TaskQueue};
    use crate::core::bulk::types::BulkJob;
    use crate::storage::redis::RedisPool;
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use redis::AsyncCommands;
    use redis::aio::MultiplexedConnection;
    use tracing::{debug, error};

    /// Seconds a consumer blocks on `BRPOP` before polling again
    const POP_TIMEOUT_SECS: u64 = 5;

    /// Durable producer: jobs are pushed as JSON onto a Redis list
    #[derive(Debug, Clone)]
    pub struct RedisQueue {
        pool: RedisPool,
        key: String,
    }

    impl RedisQueue {
        pub fn new(pool: RedisPool, key: impl Into<String>) -> Self {
            Self {
                pool,
                key: key.into(),
            }
        }

        /// Open a consumer on the same list
        pub async fn source(&self) -> Result<RedisJobSource> {
            Ok(RedisJobSource {
                conn: self.pool.dedicated_connection().await?,
                key: self.key.clone(),
            })
        }
    }

    #[async_trait]
    impl TaskQueue for RedisQueue {
        fn name(&self) -> &'static str {
            "redis"
        }

        async fn enqueue(&self, job: BulkJob) -> Result<()> {
            let body = serde_json::to_string(&job)?;
            let mut conn = self.pool.connection();
            let _: () = conn.lpush(&self.key, body).await?;
            debug!(job_id = %job.job_id, key = %self.key, "Pushed bulk job to Redis");
            Ok(())
        }
    }

    /// Durable consumer popping jobs in FIFO order
    pub struct RedisJobSource {
        conn: MultiplexedConnection,
        key: String,
    }

    #[async_trait]
    impl JobSource for RedisJobSource {
        async fn next_job(&mut self) -> Result<Option<BulkJob>> {
            loop {
                let popped: Option<(String, String)> = redis::cmd("BRPOP")
                    .arg(&self.key)
                    .arg(POP_TIMEOUT_SECS)
                    .query_async(&mut self.conn)
                    .await?;

                let Some((_, body)) = popped else {
                    continue;
                };

                match serde_json::from_str::<BulkJob>(&body) {
                    Ok(job) => return Ok(Some(job)),
                    Err(e) => error!(key = %self.key, error = %e, "Discarding malformed bulk job"),
                }
            }
        }
    }
}
