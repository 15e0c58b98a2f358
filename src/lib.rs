//! # admin-bulk
//!
//! Bulk action engine for the NGO administration back-end.
//!
//! Every bulk request goes through the same pipeline: the id list is validated against
//! the resource (non-empty, deduplicated, under the batch ceiling, all ids known), then the
//! action runs either synchronously inside one transaction or, for large delete/update
//! batches, is handed to a task queue and executed by a retrying worker.
//!
//! ## Features
//!
//! - **Uniform validation**: the same checks and error bodies for every resource
//! - **Sync or deferred execution**: per-resource thresholds decide when a batch is queued
//! - **Custom actions**: resources register extra named actions next to delete and update
//! - **Two queues**: an in-process channel, or a durable Redis list shared with `worker`
//!
//! ## Embedding the engine
//!
//! ```rust,no_run
//! use admin_bulk::core::bulk::{BulkActionService, BulkRequest, BulkSettings};
//! use admin_bulk::storage::database::{Database, FAMILIES, FamilyResource};
//! use admin_bulk::config::DatabaseConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::new(&DatabaseConfig::in_memory()).await?;
//!     db.migrate().await?;
//!
//!     let resource = Arc::new(FamilyResource::new(db.connection().clone(), FAMILIES));
//!     let service = BulkActionService::new(resource, BulkSettings::default());
//!
//!     let result = service.bulk_delete(BulkRequest::new(vec![uuid::Uuid::new_v4()])).await;
//!     println!("{:?}", result.map(|r| r.message));
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::bulk::{
    BulkAction, BulkActionResult, BulkActionService, BulkJob, BulkPayload, BulkRequest,
    BulkResource, BulkSettings, BulkWorker, CustomOutcome, ValidatedBulkRequest,
};
pub use server::{run_server, run_worker};
pub use utils::error::{AdminError, BulkValidationError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
