//! Bulk action types and data structures

use crate::utils::error::BulkValidationError;
use actix_web::http::StatusCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Field name to new value, applied by bulk update
pub type BulkPayload = serde_json::Map<String, serde_json::Value>;

/// Kind of bulk action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkAction {
    /// Delete every matching record
    Delete,
    /// Set payload fields on every matching record
    Update,
    /// Caller-supplied mutation
    Custom,
}

impl BulkAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            BulkAction::Delete => "delete",
            BulkAction::Update => "update",
            BulkAction::Custom => "custom",
        }
    }

    /// Whether the action may be deferred to the background worker
    pub fn supports_async(&self) -> bool {
        matches!(self, BulkAction::Delete | BulkAction::Update)
    }
}

impl fmt::Display for BulkAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BulkAction {
    type Err = BulkValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "delete" => Ok(BulkAction::Delete),
            "update" => Ok(BulkAction::Update),
            "custom" => Ok(BulkAction::Custom),
            other => Err(BulkValidationError::InvalidActionType(other.to_string())),
        }
    }
}

/// Incoming bulk request: `{"ids": [...], "payload": {...}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "Id: Deserialize<'de>"))]
pub struct BulkRequest<Id> {
    /// Target record ids
    #[serde(default)]
    pub ids: Vec<Id>,
    /// Field updates, only meaningful for update and custom actions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<BulkPayload>,
}

impl<Id> BulkRequest<Id> {
    pub fn new(ids: Vec<Id>) -> Self {
        Self { ids, payload: None }
    }

    pub fn with_payload(mut self, payload: BulkPayload) -> Self {
        self.payload = Some(payload);
        self
    }
}

/// Request that passed validation: ids are unique and all exist
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedBulkRequest<Id> {
    pub ids: Vec<Id>,
    pub payload: Option<BulkPayload>,
}

impl<Id> ValidatedBulkRequest<Id> {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Payload if present and non-empty
    pub fn non_empty_payload(&self) -> Option<&BulkPayload> {
        self.payload.as_ref().filter(|payload| !payload.is_empty())
    }
}

/// Result returned by a custom action handler
#[derive(Debug, Clone, Default)]
pub struct CustomOutcome {
    /// Records affected by the handler
    pub affected: u64,
    /// Message replacing the default one
    pub message: Option<String>,
    /// Extra fields merged into the response body
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Structured result of one bulk invocation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkActionResult {
    pub message: String,
    pub action: BulkAction,
    /// Affected records; for scheduled actions, the number of ids handed to the worker
    pub count: u64,
    /// Ids in the validated request
    #[serde(skip)]
    pub requested_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_fields: Option<Vec<String>>,
    #[serde(rename = "async")]
    pub is_async: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl BulkActionResult {
    pub fn deleted(requested_count: usize, count: u64) -> Self {
        Self {
            message: format!("{} objects deleted successfully.", count),
            action: BulkAction::Delete,
            count,
            requested_count,
            updated_fields: None,
            is_async: false,
            extra: serde_json::Map::new(),
        }
    }

    pub fn updated(requested_count: usize, count: u64, updated_fields: Vec<String>) -> Self {
        Self {
            message: format!("{} objects updated successfully.", count),
            action: BulkAction::Update,
            count,
            requested_count,
            updated_fields: Some(updated_fields),
            is_async: false,
            extra: serde_json::Map::new(),
        }
    }

    pub fn scheduled(action: BulkAction, requested_count: usize) -> Self {
        Self {
            message: "Bulk operation scheduled asynchronously.".to_string(),
            action,
            count: requested_count as u64,
            requested_count,
            updated_fields: None,
            is_async: true,
            extra: serde_json::Map::new(),
        }
    }

    pub fn custom(name: &str, requested_count: usize, outcome: CustomOutcome) -> Self {
        Self {
            message: outcome.message.unwrap_or_else(|| {
                format!("Bulk action '{}' applied to {} objects.", name, outcome.affected)
            }),
            action: BulkAction::Custom,
            count: outcome.affected,
            requested_count,
            updated_fields: None,
            is_async: false,
            extra: outcome.extra,
        }
    }

    /// 202 for work handed to the worker, 200 for completed work
    pub fn status_code(&self) -> StatusCode {
        if self.is_async {
            StatusCode::ACCEPTED
        } else {
            StatusCode::OK
        }
    }
}

/// Queue message for a deferred bulk action.
///
/// Ids travel as strings and are re-parsed by the worker for the target resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkJob {
    pub job_id: Uuid,
    /// Label of the resource registered with the worker
    pub resource: String,
    pub action: BulkAction,
    pub ids: Vec<String>,
    #[serde(default)]
    pub payload: Option<BulkPayload>,
    pub enqueued_at: DateTime<Utc>,
}

impl BulkJob {
    pub fn new<Id: fmt::Display>(
        resource: impl Into<String>,
        action: BulkAction,
        ids: &[Id],
        payload: Option<BulkPayload>,
    ) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            resource: resource.into(),
            action,
            ids: ids.iter().map(ToString::to_string).collect(),
            payload,
            enqueued_at: Utc::now(),
        }
    }
}
