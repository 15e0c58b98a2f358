//! Queued bulk actions executed by the worker

#[cfg(test)]
mod tests {
    use crate::common::TestDatabase;
    use crate::common::fixtures::{families, seed_caretakers, seed_families};
    use admin_bulk::core::bulk::{
        BulkActionService, BulkJob, BulkPayload, BulkRequest, BulkSettings, TaskQueue, in_process,
    };
    use admin_bulk::server::bulk_worker;
    use admin_bulk::storage::database::{CARETAKERS, FAMILIES, FamilyResource};
    use admin_bulk::utils::error::RetryConfig;
    use admin_bulk::{AdminError, BulkAction};
    use serde_json::json;
    use std::sync::Arc;
    use std::time::Duration;
    use uuid::Uuid;

    fn fast_retry() -> RetryConfig {
        RetryConfig {
            max_attempts: 2,
            base_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(2),
            backoff_multiplier: 2.0,
            jitter: false,
        }
    }

    #[tokio::test]
    async fn test_worker_covers_every_resource() {
        let db = TestDatabase::new().await;
        let worker = bulk_worker(db.connection(), fast_retry());
        assert_eq!(worker.labels(), vec![CARETAKERS, FAMILIES]);
    }

    #[tokio::test]
    async fn test_large_delete_is_queued_then_executed() {
        let db = TestDatabase::new().await;
        let ids = seed_families(db.connection(), 12).await;

        let (queue, source) = in_process(8);
        let queue: Arc<dyn TaskQueue> = Arc::new(queue);
        let service = BulkActionService::new(
            Arc::new(FamilyResource::new(db.connection().clone(), FAMILIES)),
            BulkSettings::new(100, 10),
        )
        .with_queue(queue);

        let result = service
            .bulk_delete(BulkRequest::new(ids.clone()))
            .await
            .unwrap();
        assert!(result.is_async);
        assert_eq!(result.count, 12);
        assert_eq!(families(db.connection(), &ids).await.len(), 12);

        // Dropping the service closes the queue so the worker drains and stops
        drop(service);
        let worker = Arc::new(bulk_worker(db.connection(), fast_retry()));
        worker.run(source, 2).await.unwrap();

        assert!(families(db.connection(), &ids).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_job_applies_payload() {
        let db = TestDatabase::new().await;
        let ids = seed_families(db.connection(), 3).await;
        let worker = bulk_worker(db.connection(), fast_retry());

        let mut payload = BulkPayload::new();
        payload.insert("status".to_string(), json!("archived"));
        let job = BulkJob::new(FAMILIES, BulkAction::Update, &ids, Some(payload));

        assert_eq!(worker.execute(&job).await.unwrap(), 3);
        let rows = families(db.connection(), &ids).await;
        assert!(rows.iter().all(|f| f.status == "archived"));
    }

    #[tokio::test]
    async fn test_job_for_vanished_records_affects_nothing() {
        let db = TestDatabase::new().await;
        let worker = bulk_worker(db.connection(), fast_retry());

        let job = BulkJob::new(FAMILIES, BulkAction::Delete, &[Uuid::new_v4()], None);
        assert_eq!(worker.execute(&job).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invalid_jobs_are_not_retried_into_success() {
        let db = TestDatabase::new().await;
        let ids = seed_caretakers(db.connection(), 1).await;
        let worker = bulk_worker(db.connection(), fast_retry());

        let unknown = BulkJob::new("volunteers", BulkAction::Delete, &ids, None);
        assert!(matches!(
            worker.execute(&unknown).await,
            Err(AdminError::UnknownResource(_))
        ));

        let bad_ids = BulkJob::new(CARETAKERS, BulkAction::Delete, &["not-a-uuid"], None);
        assert!(matches!(
            worker.execute(&bad_ids).await,
            Err(AdminError::InvalidJob(_))
        ));

        let no_payload = BulkJob::new(CARETAKERS, BulkAction::Update, &ids, None);
        assert!(worker.execute(&no_payload).await.is_err());
    }
}
