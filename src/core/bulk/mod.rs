//! Bulk action engine
//!
//! Validates bulk requests against a resource, then either executes them inline in one
//! transaction or hands them to a background worker through a task queue.
//!
//! - `types` - requests, results and queue jobs
//! - `resource` - the capability a resource exposes to the engine
//! - `validator` - id checks run before any mutation
//! - `dispatcher` - `BulkActionService`, the sync/async decision
//! - `queue` - in-process and Redis task queues
//! - `worker` - job execution with retry

pub mod dispatcher;
pub mod queue;
pub mod resource;
pub mod types;
pub mod validator;
pub mod worker;


pub use crate::config::BulkSettings;
pub use dispatcher::{BulkActionService, CustomHandler};
#[cfg(feature = "redis")]
pub use queue::{RedisJobSource, RedisQueue};
pub use queue::{InProcessJobSource, InProcessQueue, JobSource, TaskQueue, in_process};
pub use resource::{BulkId, BulkResource};
pub use types::{
    BulkAction, BulkActionResult, BulkJob, BulkPayload, BulkRequest, CustomOutcome,
    ValidatedBulkRequest,
};
pub use validator::BulkValidator;
pub use worker::{BulkWorker, JobRunner, ResourceJobRunner};
