//! Error recovery utilities
//!
//! Retry with exponential backoff for background bulk jobs.

mod retry;
mod types;

pub use retry::{RetryOutcome, RetryPolicy};
pub use types::RetryConfig;
