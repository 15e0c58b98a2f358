//! Resource capability consumed by the bulk engine

use super::types::BulkPayload;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

/// Identifier of a record targeted by bulk actions.
///
/// Ids cross the queue boundary as strings, so every id type must round-trip through
/// `Display` and `parse_id`.
pub trait BulkId:
    Clone + Eq + Hash + fmt::Debug + fmt::Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    fn parse_id(raw: &str) -> std::result::Result<Self, String>;
}

impl<T> BulkId for T
where
    T: Clone
        + Eq
        + Hash
        + fmt::Debug
        + fmt::Display
        + Serialize
        + DeserializeOwned
        + Send
        + Sync
        + 'static
        + FromStr,
    <T as FromStr>::Err: fmt::Display,
{
    fn parse_id(raw: &str) -> std::result::Result<Self, String> {
        raw.parse::<T>().map_err(|e| e.to_string())
    }
}

/// A collection of uniquely identified records the bulk engine can mutate.
///
/// Implementations are already scoped to what the caller may see; the engine performs
/// no authorization of its own. `delete_matching` and `update_matching` must each run
/// inside a single transaction.
#[cfg_attr(test, mockall::automock(type Id = String;))]
#[async_trait]
pub trait BulkResource: Send + Sync + 'static {
    type Id: BulkId;

    /// Stable label used to route background jobs back to this resource
    fn label(&self) -> &str;

    /// Resolve which of `ids` exist, in a single lookup
    async fn find_existing(&self, ids: &[Self::Id]) -> Result<Vec<Self::Id>>;

    /// Count then delete the matching records atomically, returning the count
    async fn delete_matching(&self, ids: &[Self::Id]) -> Result<u64>;

    /// Count then apply `payload` to the matching records atomically, returning the count
    async fn update_matching(&self, ids: &[Self::Id], payload: &BulkPayload) -> Result<u64>;
}
