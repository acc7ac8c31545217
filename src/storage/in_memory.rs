//! In-memory implementation of RecordStore for testing and development

use crate::core::error::{CrudError, RecordError, StorageError};
use crate::core::query::StoreFilter;
use crate::core::{Record, RecordStore};
use anyhow::Result;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

/// In-memory record store
///
/// Records are kept in insertion order. Uses RwLock for thread-safe access;
/// clones share the same underlying map.
pub struct InMemoryRecordStore<T> {
    records: Arc<RwLock<IndexMap<Uuid, T>>>,
}

impl<T> InMemoryRecordStore<T> {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<Uuid, T>>> {
        self.records.read().map_err(|_| poisoned())
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<Uuid, T>>> {
        self.records.write().map_err(|_| poisoned())
    }
}

fn poisoned() -> anyhow::Error {
    CrudError::from(StorageError::LockPoisoned {
        backend: BACKEND.to_string(),
    })
    .into()
}

impl<T> Default for InMemoryRecordStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for InMemoryRecordStore<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Record> InMemoryRecordStore<T> {
    /// Number of stored records
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    /// Overlay the non-null fields of `patch` onto `current`, keeping the id.
    fn merge(current: &T, patch: T) -> Result<T> {
        let serialization = |e: serde_json::Error| -> anyhow::Error {
            CrudError::from(RecordError::Serialization {
                resource: T::resource_name().to_string(),
                message: e.to_string(),
            })
            .into()
        };

        let mut merged = serde_json::to_value(current).map_err(serialization)?;
        let patch = serde_json::to_value(patch).map_err(serialization)?;

        if let (Some(target), Value::Object(fields)) = (merged.as_object_mut(), patch) {
            for (key, value) in fields {
                if key != "id" && !value.is_null() {
                    target.insert(key, value);
                }
            }
        }

        serde_json::from_value(merged).map_err(serialization)
    }
}

#[async_trait]
impl<T: Record> RecordStore<T> for InMemoryRecordStore<T> {
    async fn insert(&self, record: &T) -> Result<()> {
        let mut records = self.write()?;
        let id = record.id();

        if records.contains_key(&id) {
            return Err(CrudError::from(RecordError::AlreadyExists {
                resource: T::resource_name().to_string(),
                id,
            })
            .into());
        }

        records.insert(id, record.clone());
        Ok(())
    }

    async fn update(&self, id: &Uuid, record: T) -> Result<()> {
        let mut records = self.write()?;

        let current = records.get_mut(id).ok_or_else(|| {
            CrudError::from(RecordError::NotFound {
                resource: T::resource_name().to_string(),
                id: *id,
            })
        })?;

        *current = Self::merge(current, record)?;
        Ok(())
    }

    async fn delete(&self, id: &Uuid) -> Result<()> {
        let mut records = self.write()?;
        records.shift_remove(id);
        Ok(())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<()> {
        let mut records = self.write()?;
        records.retain(|id, _| !ids.contains(id));
        Ok(())
    }

    async fn find_one(&self, id: &Uuid) -> Result<Option<T>> {
        let records = self.read()?;
        Ok(records.get(id).cloned())
    }

    async fn find_and_count(&self, filter: &StoreFilter) -> Result<(Vec<T>, u64)> {
        let records = self.read()?;
        Ok(filter.apply(records.values().cloned()))
    }
}
