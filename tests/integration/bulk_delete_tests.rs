//! Synchronous bulk delete against SQLite

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::fixtures::{families, seed_families, seed_families_in};
    use admin_bulk::core::bulk::{BulkActionService, BulkRequest, BulkSettings};
    use admin_bulk::storage::database::entities::family;
    use admin_bulk::storage::database::{FAMILIES, FamilyResource};
    use admin_bulk::{AdminError, BulkAction, BulkValidationError};
    use sea_orm::{ColumnTrait, Condition};
    use std::sync::Arc;
    use uuid::Uuid;

    fn service(db: &TestDatabase) -> BulkActionService<FamilyResource> {
        BulkActionService::new(
            Arc::new(FamilyResource::new(db.connection().clone(), FAMILIES)),
            BulkSettings::new(10, 5),
        )
    }

    #[tokio::test]
    async fn test_delete_removes_only_requested_records() {
        let db = TestDatabase::new().await;
        let ids = seed_families(db.connection(), 4).await;

        let result = service(&db)
            .bulk_delete(BulkRequest::new(ids[..3].to_vec()))
            .await
            .unwrap();

        assert_eq!(result.action, BulkAction::Delete);
        assert_eq!(result.count, 3);
        assert!(!result.is_async);
        assert_eq!(result.message, "3 objects deleted successfully.");

        let left = families(db.connection(), &ids).await;
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, ids[3]);
    }

    #[tokio::test]
    async fn test_repeated_delete_reports_unknown_ids() {
        let db = TestDatabase::new().await;
        let ids = seed_families(db.connection(), 2).await;
        let service = service(&db);

        service
            .bulk_delete(BulkRequest::new(ids.clone()))
            .await
            .unwrap();
        let err = service
            .bulk_delete(BulkRequest::new(ids.clone()))
            .await
            .unwrap_err();

        match err {
            AdminError::Validation(BulkValidationError::UnknownIds(missing)) => {
                let expected: Vec<String> = ids.iter().map(Uuid::to_string).collect();
                assert_eq!(missing, expected);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_counted_once() {
        let db = TestDatabase::new().await;
        let ids = seed_families(db.connection(), 2).await;

        let result = service(&db)
            .bulk_delete(BulkRequest::new(vec![ids[0], ids[1], ids[0]]))
            .await
            .unwrap();

        assert_eq!(result.count, 2);
        assert_eq!(result.requested_count, 2);
    }

    #[tokio::test]
    async fn test_batch_ceiling_rejects_before_any_delete() {
        let db = TestDatabase::new().await;
        let ids = seed_families(db.connection(), 11).await;

        let err = service(&db)
            .bulk_delete(BulkRequest::new(ids.clone()))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AdminError::Validation(BulkValidationError::BatchTooLarge {
                limit: 10,
                actual: 11
            })
        ));
        assert_eq!(families(db.connection(), &ids).await.len(), 11);
    }

    #[tokio::test]
    async fn test_scope_hides_records_outside_it() {
        let db = TestDatabase::new().await;
        let visible = seed_families_in(db.connection(), 2, "ifashe").await;
        let hidden = seed_families_in(db.connection(), 1, "sponsorship").await;

        let resource = FamilyResource::new(db.connection().clone(), FAMILIES)
            .scoped(Condition::all().add(family::Column::Program.eq("ifashe")));
        let service = BulkActionService::new(Arc::new(resource), BulkSettings::new(10, 5));

        let err = service
            .bulk_delete(BulkRequest::new(vec![visible[0], hidden[0]]))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AdminError::Validation(BulkValidationError::UnknownIds(ref missing))
                if missing == &vec![hidden[0].to_string()]
        ));

        let result = service
            .bulk_delete(BulkRequest::new(visible.clone()))
            .await
            .unwrap();
        assert_eq!(result.count, 2);
        assert_eq!(families(db.connection(), &hidden).await.len(), 1);
    }
}
