//! # crudbase
//!
//! A generic CRUD layer for web backends: one service, generic over the
//! record type, wrapping a pluggable record store and answering every call
//! with a uniform `{code, message, data}` envelope.
//!
//! ## Features
//!
//! - **Generic Service**: `add`, `update`, `delete`, `delete_by_ids`, `find_by_id`, `find`
//! - **Dynamic Conditions**: client-supplied field/operator/value filters, order clause and pagination
//! - **OR-substring Search**: `orlike` matches one value across several columns
//! - **Pluggable Storage**: in-memory store included, PostgreSQL behind the `postgres` feature
//! - **Uniform Envelope**: success and failure responses share one shape
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use crudbase::prelude::*;
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! struct User {
//!     id: Uuid,
//!     name: String,
//!     email: String,
//! }
//!
//! impl Record for User {
//!     fn resource_name() -> &'static str {
//!         "users"
//!     }
//!
//!     fn id(&self) -> Uuid {
//!         self.id
//!     }
//! }
//!
//! let service = RecordService::new(Arc::new(InMemoryRecordStore::<User>::new()));
//! service.add(user).await?;
//!
//! let request = SearchRequest::new()
//!     .filter("name,email", Operator::OrLike, "alice")
//!     .order_by("name asc")
//!     .page(1, 20);
//! let page = service.find(&request).await?;
//! ```

pub mod config;
pub mod core;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{CrudService, Record, RecordStore};

    // === Service & Envelope ===
    pub use crate::core::{Envelope, Page, RecordService, StatusCode};

    // === Query ===
    pub use crate::core::{
        FieldValue, FilterClause, Operator, Predicate, SearchRequest, SortDirection, StoreFilter,
        WhereClause,
    };

    // === Errors ===
    pub use crate::core::{ConfigError, CrudError, RecordError, StorageError};

    // === Storage ===
    pub use crate::storage::InMemoryRecordStore;
    #[cfg(feature = "postgres")]
    pub use crate::storage::PostgresRecordStore;

    // === Config ===
    pub use crate::config::{CrudConfig, Messages};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;
}
