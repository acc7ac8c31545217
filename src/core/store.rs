//! Record store capability consumed by the generic service

use crate::core::query::StoreFilter;
use crate::core::record::Record;
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Storage backend for records of type `T`
///
/// Implementations own query execution, transactions, result caching and
/// any retry policy. Each method is a single round trip to the backend.
/// Implementations must be safe to share across concurrent callers.
#[async_trait]
pub trait RecordStore<T: Record>: Send + Sync {
    /// Insert a new record
    async fn insert(&self, record: &T) -> Result<()>;

    /// Update the record identified by `id` with the fields of `record`
    async fn update(&self, id: &Uuid, record: T) -> Result<()>;

    /// Delete one record by id
    async fn delete(&self, id: &Uuid) -> Result<()>;

    /// Delete every record whose id is in `ids`
    async fn delete_many(&self, ids: &[Uuid]) -> Result<()>;

    /// Fetch one record by primary key
    async fn find_one(&self, id: &Uuid) -> Result<Option<T>>;

    /// Fetch the page selected by `filter` and count every match
    async fn find_and_count(&self, filter: &StoreFilter) -> Result<(Vec<T>, u64)>;
}
