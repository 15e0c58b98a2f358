//! Bulk action endpoints
//!
//! Every resource gets the same three routes under `/api/v1/{resource}`:
//! `bulk-delete`, `bulk-update` and `bulk-actions/{name}`. Completed work answers 200,
//! work handed to the worker answers 202.

use crate::core::bulk::{BulkActionResult, BulkActionService, BulkRequest, BulkResource};
use crate::utils::error::Result;
use actix_web::{HttpResponse, web};
use std::sync::Arc;
use tracing::debug;

/// Mount the bulk routes for one resource
pub fn configure_resource<R: BulkResource>(
    cfg: &mut web::ServiceConfig,
    label: &str,
    service: Arc<BulkActionService<R>>,
) {
    cfg.service(
        web::scope(&format!("/api/v1/{}", label))
            .app_data(web::Data::from(service))
            .route("/bulk-delete", web::post().to(bulk_delete::<R>))
            .route("/bulk-update", web::post().to(bulk_update::<R>))
            .route("/bulk-actions/{name}", web::post().to(bulk_action::<R>)),
    );
}

/// POST /api/v1/{resource}/bulk-delete
pub async fn bulk_delete<R: BulkResource>(
    service: web::Data<BulkActionService<R>>,
    body: web::Json<BulkRequest<R::Id>>,
) -> Result<HttpResponse> {
    debug!(resource = service.resource().label(), ids = body.ids.len(), "Bulk delete requested");
    let result = service.bulk_delete(body.into_inner()).await?;
    Ok(respond(&result))
}

/// POST /api/v1/{resource}/bulk-update
pub async fn bulk_update<R: BulkResource>(
    service: web::Data<BulkActionService<R>>,
    body: web::Json<BulkRequest<R::Id>>,
) -> Result<HttpResponse> {
    debug!(resource = service.resource().label(), ids = body.ids.len(), "Bulk update requested");
    let result = service.bulk_update(body.into_inner()).await?;
    Ok(respond(&result))
}

/// POST /api/v1/{resource}/bulk-actions/{name}
pub async fn bulk_action<R: BulkResource>(
    service: web::Data<BulkActionService<R>>,
    name: web::Path<String>,
    body: web::Json<BulkRequest<R::Id>>,
) -> Result<HttpResponse> {
    let name = name.into_inner();
    debug!(resource = service.resource().label(), action = %name, "Bulk action requested");
    let result = service.perform(&name, body.into_inner()).await?;
    Ok(respond(&result))
}

fn respond(result: &BulkActionResult) -> HttpResponse {
    HttpResponse::build(result.status_code()).json(result)
}
