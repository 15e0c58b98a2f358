//! Error handling for the admin back-end
//!
//! This module defines all error types used throughout the crate.

#![allow(missing_docs)]

mod conversions;
mod helpers;
mod response;
mod types;

pub use response::{ErrorBody, ExecutionFailureBody};
pub use types::{AdminError, BulkValidationError, Result};
