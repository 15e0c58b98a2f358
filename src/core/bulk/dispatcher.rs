//! Bulk action service: validation, sync/async decision and execution

use super::queue::TaskQueue;
use super::resource::BulkResource;
use super::types::{
    BulkAction, BulkActionResult, BulkJob, BulkRequest, CustomOutcome, ValidatedBulkRequest,
};
use super::validator::BulkValidator;
use crate::config::BulkSettings;
use crate::utils::error::{AdminError, BulkValidationError, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tracing::{info, warn};

/// Caller-supplied mutation registered under a custom action name
pub type CustomHandler<R> = Arc<
    dyn Fn(
            Arc<R>,
            ValidatedBulkRequest<<R as BulkResource>::Id>,
        ) -> BoxFuture<'static, Result<CustomOutcome>>
        + Send
        + Sync,
>;

/// Bulk actions for one resource.
///
/// Controllers hold one service per resource and delegate to it. Delete and update
/// requests at or above `async_threshold` go to the task queue when one is attached;
/// everything else runs inline in a single transaction owned by the resource.
pub struct BulkActionService<R: BulkResource> {
    resource: Arc<R>,
    settings: BulkSettings,
    validator: BulkValidator,
    queue: Option<Arc<dyn TaskQueue>>,
    custom_actions: HashMap<String, CustomHandler<R>>,
}

impl<R: BulkResource> BulkActionService<R> {
    pub fn new(resource: Arc<R>, settings: BulkSettings) -> Self {
        Self {
            resource,
            validator: BulkValidator::new(&settings),
            settings,
            queue: None,
            custom_actions: HashMap::new(),
        }
    }

    /// Attach the queue used for deferred execution
    pub fn with_queue(mut self, queue: Arc<dyn TaskQueue>) -> Self {
        self.queue = Some(queue);
        self
    }

    /// Register a custom action handler under `name`
    pub fn with_custom_action<F, Fut>(mut self, name: impl Into<String>, handler: F) -> Self
    where
        F: Fn(Arc<R>, ValidatedBulkRequest<R::Id>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<CustomOutcome>> + Send + 'static,
    {
        let handler: CustomHandler<R> = Arc::new(move |resource, request| handler(resource, request).boxed());
        self.custom_actions.insert(name.into(), handler);
        self
    }

    pub fn resource(&self) -> &Arc<R> {
        &self.resource
    }

    pub fn has_custom_action(&self, name: &str) -> bool {
        self.custom_actions.contains_key(name)
    }

    /// Run an action given by name: `delete`, `update`, or a registered custom action
    pub async fn perform(
        &self,
        action: &str,
        request: BulkRequest<R::Id>,
    ) -> Result<BulkActionResult> {
        match action.parse::<BulkAction>() {
            Ok(BulkAction::Delete) => self.bulk_delete(request).await,
            Ok(BulkAction::Update) => self.bulk_update(request).await,
            _ if self.has_custom_action(action) => self.bulk_custom(action, request).await,
            _ => Err(BulkValidationError::InvalidActionType(action.to_string()).into()),
        }
    }

    pub async fn bulk_delete(&self, request: BulkRequest<R::Id>) -> Result<BulkActionResult> {
        let validated = self.validator.validate(self.resource.as_ref(), request).await?;

        if let Some(queue) = self.deferral_queue(BulkAction::Delete, validated.len()) {
            return self.schedule(queue, BulkAction::Delete, validated).await;
        }

        let requested = validated.len();
        let count = self
            .resource
            .delete_matching(&validated.ids)
            .await
            .map_err(|e| self.execution_failure(BulkAction::Delete, e))?;

        info!(
            resource = self.resource.label(),
            action = "delete",
            count,
            "Bulk delete completed"
        );
        Ok(BulkActionResult::deleted(requested, count))
    }

    pub async fn bulk_update(&self, request: BulkRequest<R::Id>) -> Result<BulkActionResult> {
        let validated = self.validator.validate(self.resource.as_ref(), request).await?;

        let Some(payload) = validated.non_empty_payload() else {
            return Err(BulkValidationError::MissingPayload.into());
        };
        let fields: Vec<String> = payload.keys().cloned().collect();

        if let Some(queue) = self.deferral_queue(BulkAction::Update, validated.len()) {
            return self.schedule(queue, BulkAction::Update, validated).await;
        }

        let count = self
            .resource
            .update_matching(&validated.ids, payload)
            .await
            .map_err(|e| self.execution_failure(BulkAction::Update, e))?;

        info!(
            resource = self.resource.label(),
            action = "update",
            count,
            fields = ?fields,
            "Bulk update completed"
        );
        Ok(BulkActionResult::updated(validated.len(), count, fields))
    }

    /// Run a registered custom action; these never leave the request path
    pub async fn bulk_custom(
        &self,
        name: &str,
        request: BulkRequest<R::Id>,
    ) -> Result<BulkActionResult> {
        let handler = self
            .custom_actions
            .get(name)
            .cloned()
            .ok_or_else(|| BulkValidationError::InvalidActionType(name.to_string()))?;

        let validated = self.validator.validate(self.resource.as_ref(), request).await?;
        let requested = validated.len();

        let outcome = handler(Arc::clone(&self.resource), validated)
            .await
            .map_err(|e| self.execution_failure(BulkAction::Custom, e))?;

        info!(
            resource = self.resource.label(),
            action = name,
            count = outcome.affected,
            "Custom bulk action completed"
        );
        Ok(BulkActionResult::custom(name, requested, outcome))
    }

    fn deferral_queue(&self, action: BulkAction, len: usize) -> Option<&Arc<dyn TaskQueue>> {
        if action.supports_async() && len >= self.settings.async_threshold {
            self.queue.as_ref()
        } else {
            None
        }
    }

    async fn schedule(
        &self,
        queue: &Arc<dyn TaskQueue>,
        action: BulkAction,
        validated: ValidatedBulkRequest<R::Id>,
    ) -> Result<BulkActionResult> {
        let payload = match action {
            BulkAction::Update => validated.payload.clone(),
            _ => None,
        };
        let job = BulkJob::new(self.resource.label(), action, &validated.ids, payload);
        let job_id = job.job_id;

        queue
            .enqueue(job)
            .await
            .map_err(|e| self.execution_failure(action, e))?;

        info!(
            resource = self.resource.label(),
            action = %action,
            job_id = %job_id,
            queue = queue.name(),
            count = validated.len(),
            "Bulk operation scheduled"
        );
        Ok(BulkActionResult::scheduled(action, validated.len()))
    }

    fn execution_failure(&self, action: BulkAction, err: AdminError) -> AdminError {
        warn!(
            resource = self.resource.label(),
            action = %action,
            error = %err,
            "Bulk operation failed"
        );
        match err {
            AdminError::ExecutionFailure(_) => err,
            other => AdminError::ExecutionFailure(other.to_string()),
        }
    }
}
