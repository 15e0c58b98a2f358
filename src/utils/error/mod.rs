//! Error Handling utilities
//!
//! This module provides the error taxonomy, HTTP error mapping, and retry with backoff.

pub mod error;
pub mod recovery;

// Re-export commonly used types and functions
pub use error::*;
pub use recovery::*;
