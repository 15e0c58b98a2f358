//! Helper functions for creating and classifying errors

use super::types::AdminError;
use sea_orm::DbErr;

impl AdminError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn bad_request<S: Into<String>>(message: S) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn execution_failure<S: Into<String>>(message: S) -> Self {
        Self::ExecutionFailure(message.into())
    }

    pub fn queue<S: Into<String>>(message: S) -> Self {
        Self::Queue(message.into())
    }

    pub fn invalid_job<S: Into<String>>(message: S) -> Self {
        Self::InvalidJob(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Whether a failed background job is worth another attempt.
    ///
    /// Storage, queue and I/O failures are transient. Constraint violations and
    /// everything else that depends only on the job content fail the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            AdminError::Database(err) => !is_constraint_violation(err),
            AdminError::Io(_)
            | AdminError::Queue(_)
            | AdminError::Internal(_) => true,
            #[cfg(feature = "redis")]
            AdminError::Redis(_) => true,
            AdminError::ExecutionFailure(_) => true,
            AdminError::Config(_)
            | AdminError::Serialization(_)
            | AdminError::Yaml(_)
            | AdminError::Validation(_)
            | AdminError::BadRequest(_)
            | AdminError::UnknownResource(_)
            | AdminError::UnsupportedAction(_)
            | AdminError::InvalidJob(_) => false,
        }
    }
}

/// Unique, foreign-key and NOT NULL failures raised while executing a statement
fn is_constraint_violation(err: &DbErr) -> bool {
    match err {
        DbErr::Exec(_) | DbErr::Query(_) => {
            err.sql_err().is_some() || err.to_string().to_ascii_lowercase().contains("constraint")
        }
        _ => false,
    }
}
