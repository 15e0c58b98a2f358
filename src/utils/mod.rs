//! Utility modules for the admin back-end
//!
//! - **error**: Error types, HTTP mapping, and retry/backoff
//! - **logging**: Tracing subscriber setup

pub mod error; // Error handling
pub mod logging; // Logging

pub use error::{AdminError, BulkValidationError, Result};

/// Render an id list for log fields, eliding the tail of very large batches
pub fn summarize_ids(ids: &[String], max: usize) -> String {
    if ids.len() <= max {
        return ids.join(",");
    }
    format!("{},... (+{} more)", ids[..max].join(","), ids.len() - max)
}
