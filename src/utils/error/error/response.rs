//! HTTP response handling for errors

use super::types::{AdminError, BulkValidationError};
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

/// Body for validation and request errors
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_ids: Option<Vec<String>>,
}

/// Body for a bulk operation that failed during execution
#[derive(Debug, Serialize)]
pub struct ExecutionFailureBody {
    pub message: String,
    pub error: String,
}

impl ResponseError for AdminError {
    fn status_code(&self) -> StatusCode {
        match self {
            AdminError::Validation(_)
            | AdminError::BadRequest(_)
            | AdminError::ExecutionFailure(_)
            | AdminError::UnsupportedAction(_)
            | AdminError::InvalidJob(_) => StatusCode::BAD_REQUEST,
            AdminError::UnknownResource(_) => StatusCode::NOT_FOUND,
            AdminError::Queue(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();

        let (code, detail, missing_ids) = match self {
            AdminError::ExecutionFailure(message) => {
                return HttpResponse::build(status_code).json(ExecutionFailureBody {
                    message: "Bulk operation failed.".to_string(),
                    error: message.clone(),
                });
            }
            AdminError::Validation(err) => {
                let missing = match err {
                    BulkValidationError::UnknownIds(ids) => Some(ids.clone()),
                    _ => None,
                };
                (err.code(), err.to_string(), missing)
            }
            AdminError::BadRequest(message) => ("bad_request", message.clone(), None),
            AdminError::UnsupportedAction(_) => ("unsupported_action", self.to_string(), None),
            AdminError::InvalidJob(_) => ("invalid_job", self.to_string(), None),
            AdminError::UnknownResource(_) => ("not_found", self.to_string(), None),
            AdminError::Queue(_) => (
                "queue_unavailable",
                "Bulk job queue is unavailable".to_string(),
                None,
            ),
            _ => (
                "internal_error",
                "An internal error occurred".to_string(),
                None,
            ),
        };

        HttpResponse::build(status_code).json(ErrorBody {
            detail,
            code: code.to_string(),
            missing_ids,
        })
    }
}
