//! Generic record service exposing CRUD and search over a record store

use crate::config::CrudConfig;
use crate::core::envelope::Envelope;
use crate::core::query::{SearchRequest, StoreFilter};
use crate::core::record::Record;
use crate::core::store::RecordStore;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, OnceLock};
use uuid::Uuid;

/// One page of a list query together with the total match count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub list: Vec<T>,
    pub total: u64,
}

/// CRUD operations over a [`RecordStore`], wrapped in [`Envelope`]s
///
/// Concrete services only provide [`store`](CrudService::store) and inherit
/// every operation; they may override any of them to add domain rules.
/// Each operation issues exactly one store call and propagates store errors
/// unchanged.
///
/// # Example
/// ```rust,ignore
/// struct UserService {
///     store: PostgresRecordStore<User>,
/// }
///
/// impl CrudService<User> for UserService {
///     fn store(&self) -> &dyn RecordStore<User> {
///         &self.store
///     }
/// }
///
/// let page = service.find(&SearchRequest::new().page(1, 20)).await?;
/// ```
#[async_trait]
pub trait CrudService<T: Record>: Send + Sync {
    /// The backing store
    fn store(&self) -> &dyn RecordStore<T>;

    /// Service configuration (messages and cache hint)
    fn config(&self) -> &CrudConfig {
        static DEFAULT: OnceLock<CrudConfig> = OnceLock::new();
        DEFAULT.get_or_init(CrudConfig::default)
    }

    /// Insert `entity` and echo it back
    async fn add(&self, entity: T) -> Result<Envelope<T>> {
        tracing::debug!(resource = T::resource_name(), id = %entity.id(), "adding record");
        self.store().insert(&entity).await?;
        Ok(Envelope::success_with(entity, &self.config().messages.created))
    }

    /// Update the record identified by `id` and echo the id back
    async fn update(&self, id: &Uuid, entity: T) -> Result<Envelope<Uuid>> {
        tracing::debug!(resource = T::resource_name(), id = %id, "updating record");
        self.store().update(id, entity).await?;
        Ok(Envelope::success_with(*id, &self.config().messages.updated))
    }

    /// Delete one record and echo the id back
    async fn delete(&self, id: &Uuid) -> Result<Envelope<Uuid>> {
        tracing::debug!(resource = T::resource_name(), id = %id, "deleting record");
        self.store().delete(id).await?;
        Ok(Envelope::success_with(*id, &self.config().messages.deleted))
    }

    /// Delete every record in `ids` and echo the ids back
    async fn delete_by_ids(&self, ids: Vec<Uuid>) -> Result<Envelope<Vec<Uuid>>> {
        tracing::debug!(resource = T::resource_name(), count = ids.len(), "deleting records");
        self.store().delete_many(&ids).await?;
        Ok(Envelope::success_with(ids, &self.config().messages.deleted))
    }

    /// Fetch one record; absence is a successful envelope with null data
    async fn find_by_id(&self, id: &Uuid) -> Result<Envelope<Option<T>>> {
        let record = self.store().find_one(id).await?;
        tracing::debug!(
            resource = T::resource_name(),
            id = %id,
            found = record.is_some(),
            "fetched record"
        );
        Ok(Envelope::success_with(record, &self.config().messages.success))
    }

    /// Filtered, sorted and paginated list with total count
    async fn find(&self, request: &SearchRequest) -> Result<Envelope<Page<T>>> {
        let filter = StoreFilter::from_request(request, self.config().cache);
        tracing::debug!(
            resource = T::resource_name(),
            clauses = request.search_condition.len(),
            skip = ?filter.skip,
            take = ?filter.take,
            "finding records"
        );

        let (list, total) = self.store().find_and_count(&filter).await?;
        Ok(Envelope::success_with(
            Page { list, total },
            &self.config().messages.success,
        ))
    }
}

/// Ready-made [`CrudService`] holding a shared store
pub struct RecordService<T: Record> {
    store: Arc<dyn RecordStore<T>>,
    config: CrudConfig,
}

impl<T: Record> RecordService<T> {
    /// Create a service with the default configuration
    pub fn new(store: Arc<dyn RecordStore<T>>) -> Self {
        Self::with_config(store, CrudConfig::default())
    }

    pub fn with_config(store: Arc<dyn RecordStore<T>>, config: CrudConfig) -> Self {
        Self { store, config }
    }
}

impl<T: Record> Clone for RecordService<T> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<T: Record> CrudService<T> for RecordService<T> {
    fn store(&self) -> &dyn RecordStore<T> {
        self.store.as_ref()
    }

    fn config(&self) -> &CrudConfig {
        &self.config
    }
}
