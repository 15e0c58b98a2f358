//! Type conversions for AdminError

use super::types::AdminError;

impl<T> From<tokio::sync::mpsc::error::TrySendError<T>> for AdminError {
    fn from(err: tokio::sync::mpsc::error::TrySendError<T>) -> Self {
        use tokio::sync::mpsc::error::TrySendError;

        match err {
            TrySendError::Full(_) => AdminError::Queue("job queue full".to_string()),
            TrySendError::Closed(_) => AdminError::Queue("job channel closed".to_string()),
        }
    }
}

impl From<tokio::sync::AcquireError> for AdminError {
    fn from(err: tokio::sync::AcquireError) -> Self {
        AdminError::Internal(format!("worker semaphore closed: {}", err))
    }
}

impl From<tokio::task::JoinError> for AdminError {
    fn from(err: tokio::task::JoinError) -> Self {
        AdminError::Internal(format!("task join failed: {}", err))
    }
}
