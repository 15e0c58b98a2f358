// Module declarations
mod connection;
mod resource;
mod types;

// Re-export public types
pub use resource::SeaOrmResource;
pub use types::{DatabaseBackendType, SeaOrmDatabase};
