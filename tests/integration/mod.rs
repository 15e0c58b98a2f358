//! Integration tests for admin-bulk
//!
//! These tests drive the bulk engine against a real in-memory database
//! without mocking.

pub mod async_worker_tests;
pub mod bulk_delete_tests;
pub mod bulk_update_tests;
pub mod config_tests;
