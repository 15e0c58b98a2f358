//! Error type definitions

use thiserror::Error;

/// Result type alias for the admin back-end
pub type Result<T> = std::result::Result<T, AdminError>;

/// Rejections raised before any bulk mutation begins
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BulkValidationError {
    /// No ids were supplied
    #[error("At least one id is required.")]
    EmptyIdSet,

    /// More ids than the resource allows per request
    #[error("Maximum {limit} items allowed per bulk operation, got {actual}.")]
    BatchTooLarge { limit: usize, actual: usize },

    /// Ids that do not resolve to an existing record
    #[error("The following ids do not exist: {}", .0.join(", "))]
    UnknownIds(Vec<String>),

    /// Update requested without any fields to set
    #[error("A non-empty payload is required for bulk update.")]
    MissingPayload,

    /// Action outside delete/update/custom, or an unregistered custom action
    #[error("Invalid action type: {0}")]
    InvalidActionType(String),
}

impl BulkValidationError {
    /// Stable machine-readable code for response bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyIdSet => "empty_id_set",
            Self::BatchTooLarge { .. } => "batch_too_large",
            Self::UnknownIds(_) => "unknown_ids",
            Self::MissingPayload => "missing_payload",
            Self::InvalidActionType(_) => "invalid_action_type",
        }
    }
}

/// Main error type for the admin back-end
#[derive(Error, Debug)]
pub enum AdminError {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Redis errors
    #[cfg(feature = "redis")]
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Bulk request validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] BulkValidationError),

    /// Malformed input that is not part of the bulk taxonomy (unknown field, bad value)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A synchronous bulk operation failed and was rolled back
    #[error("Bulk operation failed: {0}")]
    ExecutionFailure(String),

    /// Task queue errors
    #[error("Queue error: {0}")]
    Queue(String),

    /// No job runner registered under the label
    #[error("Unknown resource: {0}")]
    UnknownResource(String),

    /// Job carries an action the worker cannot execute
    #[error("Unsupported bulk action: {0}")]
    UnsupportedAction(String),

    /// Job content that can never succeed (unparsable ids, missing payload)
    #[error("Invalid job: {0}")]
    InvalidJob(String),

    /// Internal server errors
    #[error("Internal server error: {0}")]
    Internal(String),
}
