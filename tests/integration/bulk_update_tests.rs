//! Synchronous bulk update against SQLite

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::fixtures::{families, seed_caretakers, seed_families};
    use admin_bulk::core::bulk::{BulkActionService, BulkPayload, BulkRequest, BulkSettings};
    use admin_bulk::storage::database::entities::caretaker;
    use admin_bulk::storage::database::{
        CARETAKERS, CaretakerResource, FAMILIES, FamilyResource,
    };
    use admin_bulk::{AdminError, BulkAction, BulkValidationError};
    use sea_orm::EntityTrait;
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;

    fn payload(value: serde_json::Value) -> BulkPayload {
        value.as_object().cloned().unwrap_or_default()
    }

    fn families_service(db: &TestDatabase) -> BulkActionService<FamilyResource> {
        BulkActionService::new(
            Arc::new(FamilyResource::new(db.connection().clone(), FAMILIES)),
            BulkSettings::new(100, 50),
        )
    }

    #[tokio::test]
    async fn test_update_sets_fields_and_touches_updated_at() {
        let db = TestDatabase::new().await;
        let ids = seed_families(db.connection(), 3).await;
        let before = families(db.connection(), &ids).await;
        tokio::time::sleep(Duration::from_millis(10)).await;

        let result = families_service(&db)
            .bulk_update(
                BulkRequest::new(ids.clone())
                    .with_payload(payload(json!({ "status": "suspended", "program": "zamuka" }))),
            )
            .await
            .unwrap();

        assert_eq!(result.action, BulkAction::Update);
        assert_eq!(result.count, 3);
        assert_eq!(
            result.updated_fields,
            Some(vec!["program".to_string(), "status".to_string()])
        );

        let after = families(db.connection(), &ids).await;
        for family in &after {
            assert_eq!(family.status, "suspended");
            assert_eq!(family.program, "zamuka");
            let original = before.iter().find(|f| f.id == family.id).unwrap();
            assert!(family.updated_at > original.updated_at);
            assert_eq!(family.created_at, original.created_at);
        }
    }

    #[tokio::test]
    async fn test_explicit_timestamp_is_kept() {
        let db = TestDatabase::new().await;
        let ids = seed_families(db.connection(), 1).await;

        families_service(&db)
            .bulk_update(BulkRequest::new(ids.clone()).with_payload(payload(json!({
                "archived_at": "2024-03-01T10:00:00+00:00",
                "updated_at": "2024-03-01T10:00:00+00:00"
            }))))
            .await
            .unwrap();

        let family = &families(db.connection(), &ids).await[0];
        let expected = chrono::DateTime::parse_from_rfc3339("2024-03-01T10:00:00+00:00").unwrap();
        assert_eq!(family.archived_at, Some(expected));
        assert_eq!(family.updated_at, expected);
    }

    #[tokio::test]
    async fn test_null_clears_nullable_column() {
        let db = TestDatabase::new().await;
        let ids = seed_caretakers(db.connection(), 2).await;
        let service = BulkActionService::new(
            Arc::new(CaretakerResource::new(db.connection().clone(), CARETAKERS)),
            BulkSettings::default(),
        );

        let result = service
            .bulk_update(BulkRequest::new(ids.clone()).with_payload(payload(json!({ "phone": null }))))
            .await
            .unwrap();
        assert_eq!(result.count, 2);

        let caretakers = caretaker::Entity::find().all(db.connection()).await.unwrap();
        assert!(caretakers.iter().all(|c| c.phone.is_none()));
    }

    #[tokio::test]
    async fn test_missing_payload_is_a_validation_error() {
        let db = TestDatabase::new().await;
        let ids = seed_families(db.connection(), 1).await;

        let err = families_service(&db)
            .bulk_update(BulkRequest::new(ids).with_payload(BulkPayload::new()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AdminError::Validation(BulkValidationError::MissingPayload)
        ));
    }

    #[tokio::test]
    async fn test_bad_fields_fail_without_partial_writes() {
        let db = TestDatabase::new().await;
        let ids = seed_families(db.connection(), 2).await;
        let service = families_service(&db);

        for bad in [
            json!({ "status": "suspended", "id": "00000000-0000-0000-0000-000000000000" }),
            json!({ "status": "suspended", "nickname": "x" }),
            json!({ "status": 7 }),
        ] {
            let err = service
                .bulk_update(BulkRequest::new(ids.clone()).with_payload(payload(bad)))
                .await
                .unwrap_err();
            assert!(matches!(err, AdminError::ExecutionFailure(_)), "{:?}", err);
        }

        let rows = families(db.connection(), &ids).await;
        assert!(rows.iter().all(|f| f.status == "active"));
    }

    #[tokio::test]
    async fn test_database_rejection_rolls_back_every_row() {
        let db = TestDatabase::new().await;
        let ids = seed_families(db.connection(), 3).await;
        let service = families_service(&db);

        let err = service
            .bulk_update(
                BulkRequest::new(ids.clone())
                    .with_payload(payload(json!({ "status": "suspended", "name": null }))),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AdminError::ExecutionFailure(_)), "{:?}", err);

        let rows = families(db.connection(), &ids).await;
        assert_eq!(rows.len(), 3);
        assert!(rows.iter().all(|f| f.status == "active"));
    }
}
