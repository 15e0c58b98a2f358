//! Health check endpoint

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::storage::StorageHealthStatus;
use actix_web::{HttpResponse, web};
use std::borrow::Cow;
use tracing::debug;

/// Health status
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
    storage: StorageHealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    queue: Option<&'static str>,
}

/// GET /health
///
/// 200 while every configured backend answers, 503 otherwise.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    debug!("Health check requested");

    let storage = state.storage.health_check().await;
    let status = HealthStatus {
        status: Cow::Borrowed(if storage.overall { "healthy" } else { "degraded" }),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        storage,
        queue: state.queue,
    };

    let mut response = if storage.overall {
        HttpResponse::Ok()
    } else {
        HttpResponse::ServiceUnavailable()
    };
    response.json(ApiResponse::success(status))
}
