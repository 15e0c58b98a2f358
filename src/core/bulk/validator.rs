//! Bulk request validation

use super::resource::{BulkId, BulkResource};
use super::types::{BulkRequest, ValidatedBulkRequest};
use crate::config::BulkSettings;
use crate::utils::error::{BulkValidationError, Result};
use std::collections::HashSet;
use tracing::debug;

/// Validates bulk requests against a resource before anything is mutated
#[derive(Debug, Clone, Copy)]
pub struct BulkValidator {
    max_batch_size: usize,
}

impl BulkValidator {
    pub fn new(settings: &BulkSettings) -> Self {
        Self {
            max_batch_size: settings.max_batch_size,
        }
    }

    /// Check the id set and resolve it against the resource.
    ///
    /// Duplicate ids are dropped, keeping the first occurrence. Existence is resolved
    /// with a single `find_existing` call and every missing id is reported.
    pub async fn validate<R: BulkResource>(
        &self,
        resource: &R,
        request: BulkRequest<R::Id>,
    ) -> Result<ValidatedBulkRequest<R::Id>> {
        let BulkRequest { ids, payload } = request;

        if ids.is_empty() {
            return Err(BulkValidationError::EmptyIdSet.into());
        }

        let ids = dedupe(ids);
        if ids.len() > self.max_batch_size {
            return Err(BulkValidationError::BatchTooLarge {
                limit: self.max_batch_size,
                actual: ids.len(),
            }
            .into());
        }

        let existing: HashSet<R::Id> = resource.find_existing(&ids).await?.into_iter().collect();
        let missing: Vec<String> = ids
            .iter()
            .filter(|id| !existing.contains(*id))
            .map(ToString::to_string)
            .collect();

        if !missing.is_empty() {
            debug!(
                resource = resource.label(),
                missing = missing.len(),
                "Bulk request references unknown ids"
            );
            return Err(BulkValidationError::UnknownIds(missing).into());
        }

        Ok(ValidatedBulkRequest { ids, payload })
    }
}

fn dedupe<Id: BulkId>(ids: Vec<Id>) -> Vec<Id> {
    let mut seen = HashSet::with_capacity(ids.len());
    ids.into_iter().filter(|id| seen.insert(id.clone())).collect()
}
