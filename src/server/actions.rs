//! Custom bulk actions registered on resource services

use crate::core::bulk::{BulkPayload, BulkResource, CustomOutcome, ValidatedBulkRequest};
use crate::storage::database::FamilyResource;
use crate::utils::error::Result;
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;

/// Name of the family archive action, `POST /api/v1/families/bulk-actions/archive`
pub const ARCHIVE_ACTION: &str = "archive";

/// Mark families archived and stamp `archived_at`, in one transaction
pub async fn archive_families(
    resource: Arc<FamilyResource>,
    request: ValidatedBulkRequest<Uuid>,
) -> Result<CustomOutcome> {
    let archived_at = Utc::now().to_rfc3339();

    let mut payload = BulkPayload::new();
    payload.insert("status".to_string(), json!("archived"));
    payload.insert("archived_at".to_string(), json!(archived_at));

    let affected = resource.update_matching(&request.ids, &payload).await?;

    let mut extra = serde_json::Map::new();
    extra.insert("archived_at".to_string(), json!(archived_at));
    Ok(CustomOutcome {
        affected,
        message: Some(format!("{} families archived.", affected)),
        extra,
    })
}
