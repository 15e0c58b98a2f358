//! Database storage implementation using SeaORM
//!
//! Connection management, migrations, and the generic bulk resource over SeaORM entities.

/// Database entities module
pub mod entities;
/// Database migration module
pub mod migration;
/// SeaORM database implementation module
pub mod seaorm_db;

pub use seaorm_db::SeaOrmDatabase as Database;
pub use seaorm_db::{DatabaseBackendType, SeaOrmResource};

/// Bulk handle over the `families` table
pub type FamilyResource = SeaOrmResource<entities::Family>;
/// Bulk handle over the `caretakers` table
pub type CaretakerResource = SeaOrmResource<entities::Caretaker>;

/// Resource label of the families table, used in routes and queued jobs
pub const FAMILIES: &str = "families";
/// Resource label of the caretakers table
pub const CARETAKERS: &str = "caretakers";
