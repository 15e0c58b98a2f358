//! HTTP server implementation
//!
//! Exposes the bulk action engine for each resource, plus a health endpoint.

pub mod actions;
pub mod builder;
pub mod routes;
pub mod server;
pub mod state;

pub use builder::{BulkServices, ServerBuilder, bulk_worker, run_server, run_worker};
pub use server::HttpServer;
pub use state::AppState;

#[cfg(test)]
mod tests;
