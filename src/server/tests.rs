//! Tests for server module

#[cfg(test)]
mod tests {
    use crate::config::{BulkConfig, BulkSettings, Config, DatabaseConfig};
    use crate::core::bulk::{TaskQueue, in_process};
    use crate::server::builder::{BulkServices, bulk_worker};
    use crate::server::routes;
    use crate::server::server::HttpServer;
    use crate::server::state::AppState;
    use crate::storage::StorageLayer;
    use crate::storage::database::entities::family;
    use crate::storage::database::{Database, FAMILIES};
    use crate::utils::error::RetryConfig;
    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use chrono::Utc;
    use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
    use serde_json::{Value, json};
    use std::sync::Arc;
    use std::time::Duration;
    use uuid::Uuid;

    async fn database() -> DatabaseConnection {
        let db = Database::new(&DatabaseConfig::in_memory()).await.unwrap();
        db.migrate().await.unwrap();
        db.connection().clone()
    }

    async fn seed_families(db: &DatabaseConnection, n: usize) -> Vec<Uuid> {
        let now = Utc::now().fixed_offset();
        let ids: Vec<Uuid> = (0..n).map(|_| Uuid::new_v4()).collect();
        let models = ids.iter().enumerate().map(|(i, id)| family::ActiveModel {
            id: Set(*id),
            name: Set(format!("Family {i}")),
            program: Set("ifashe".to_string()),
            status: Set("active".to_string()),
            archived_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        });
        family::Entity::insert_many(models).exec(db).await.unwrap();
        ids
    }

    fn bulk_config() -> BulkConfig {
        let mut config = BulkConfig::default();
        config
            .resources
            .insert(FAMILIES.to_string(), BulkSettings::new(200, 30));
        config
    }

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            max_attempts: 4,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    macro_rules! app {
        ($services:expr) => {{
            let services = $services.clone();
            test::init_service(
                App::new()
                    .app_data(routes::json_config(1024 * 1024))
                    .configure(move |cfg| services.configure(cfg)),
            )
            .await
        }};
    }

    #[actix_web::test]
    async fn test_bulk_delete_small_batch() {
        let db = database().await;
        let ids = seed_families(&db, 3).await;
        let services = BulkServices::new(&db, &bulk_config(), None);
        let app = app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/families/bulk-delete")
            .set_json(json!({ "ids": ids }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "message": "3 objects deleted successfully.",
                "action": "delete",
                "count": 3,
                "async": false
            })
        );

        let remaining = family::Entity::find().all(&db).await.unwrap();
        assert!(remaining.is_empty());
    }

    #[actix_web::test]
    async fn test_bulk_update_large_batch_is_accepted_then_applied() {
        let db = database().await;
        let ids = seed_families(&db, 40).await;

        let (queue, source) = in_process(16);
        let queue: Arc<dyn TaskQueue> = Arc::new(queue);
        let worker = Arc::new(bulk_worker(&db, fast_retry()));
        let worker_handle = tokio::spawn(worker.run(source, 2));

        let services = BulkServices::new(&db, &bulk_config(), Some(queue));
        let app = app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/families/bulk-update")
            .set_json(json!({ "ids": ids, "payload": { "status": "archived" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::ACCEPTED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body,
            json!({
                "message": "Bulk operation scheduled asynchronously.",
                "action": "update",
                "count": 40,
                "async": true
            })
        );

        let mut archived = 0;
        for _ in 0..100 {
            archived = family::Entity::find()
                .filter(family::Column::Status.eq("archived"))
                .all(&db)
                .await
                .unwrap()
                .len();
            if archived == 40 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        assert_eq!(archived, 40);
        worker_handle.abort();
    }

    #[actix_web::test]
    async fn test_unknown_ids_rejected_with_full_list() {
        let db = database().await;
        let ids = seed_families(&db, 2).await;
        let missing = [Uuid::new_v4(), Uuid::new_v4()];
        let services = BulkServices::new(&db, &bulk_config(), None);
        let app = app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/families/bulk-delete")
            .set_json(json!({ "ids": [ids[0], missing[0], ids[1], missing[1]] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "unknown_ids");
        assert_eq!(
            body["missing_ids"],
            json!([missing[0].to_string(), missing[1].to_string()])
        );

        let remaining = family::Entity::find().all(&db).await.unwrap();
        assert_eq!(remaining.len(), 2);
    }

    #[actix_web::test]
    async fn test_empty_ids_and_malformed_body() {
        let db = database().await;
        let services = BulkServices::new(&db, &bulk_config(), None);
        let app = app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/caretakers/bulk-delete")
            .set_json(json!({ "ids": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "empty_id_set");

        let req = test::TestRequest::post()
            .uri("/api/v1/families/bulk-update")
            .set_json(json!({ "payload": { "status": "suspended" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "empty_id_set");

        let req = test::TestRequest::post()
            .uri("/api/v1/caretakers/bulk-delete")
            .set_json(json!({ "ids": ["not-a-uuid"] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "bad_request");
    }

    #[actix_web::test]
    async fn test_unknown_field_fails_without_changes() {
        let db = database().await;
        let ids = seed_families(&db, 2).await;
        let services = BulkServices::new(&db, &bulk_config(), None);
        let app = app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/families/bulk-update")
            .set_json(json!({ "ids": ids, "payload": { "status": "suspended", "colour": "red" } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Bulk operation failed.");
        assert!(body["error"].as_str().unwrap().contains("colour"));

        let suspended = family::Entity::find()
            .filter(family::Column::Status.eq("suspended"))
            .all(&db)
            .await
            .unwrap();
        assert!(suspended.is_empty());
    }

    #[actix_web::test]
    async fn test_database_error_rolls_back_update() {
        let db = database().await;
        let ids = seed_families(&db, 3).await;
        let services = BulkServices::new(&db, &bulk_config(), None);
        let app = app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/families/bulk-update")
            .set_json(json!({ "ids": ids, "payload": { "status": "suspended", "name": null } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Bulk operation failed.");
        assert!(!body["error"].as_str().unwrap().is_empty());

        let rows = family::Entity::find().all(&db).await.unwrap();
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|f| f.status == "active" && f.name.starts_with("Family ")));
    }

    #[actix_web::test]
    async fn test_archive_action_and_unknown_action() {
        let db = database().await;
        let ids = seed_families(&db, 2).await;
        let services = BulkServices::new(&db, &bulk_config(), None);
        let app = app!(services);

        let req = test::TestRequest::post()
            .uri("/api/v1/families/bulk-actions/archive")
            .set_json(json!({ "ids": ids }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["action"], "custom");
        assert_eq!(body["count"], 2);
        assert_eq!(body["message"], "2 families archived.");
        assert!(body["archived_at"].is_string());

        let archived = family::Entity::find().all(&db).await.unwrap();
        assert!(archived.iter().all(|f| f.status == "archived" && f.archived_at.is_some()));

        let req = test::TestRequest::post()
            .uri("/api/v1/caretakers/bulk-actions/archive")
            .set_json(json!({ "ids": [Uuid::new_v4()] }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "invalid_action_type");
    }

    #[actix_web::test]
    async fn test_health_reports_storage_and_queue() {
        let db = Database::new(&DatabaseConfig::in_memory()).await.unwrap();
        db.migrate().await.unwrap();
        let services = BulkServices::new(db.connection(), &bulk_config(), None);
        let state = AppState::new(
            Config::default(),
            StorageLayer::from_database(db),
            Some("in_process"),
        );
        let app = test::init_service(HttpServer::create_app(web::Data::new(state), services)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("Server").unwrap(), "admin-bulk");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["storage"]["database"], true);
        assert_eq!(body["data"]["queue"], "in_process");
    }
}
