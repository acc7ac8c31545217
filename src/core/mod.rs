//! Core module containing the record abstraction, the generic service and the query builder

pub mod envelope;
pub mod error;
pub mod field;
pub mod query;
pub mod record;
pub mod service;
pub mod store;

pub use envelope::{Envelope, StatusCode};
pub use error::{ConfigError, CrudError, RecordError, StorageError};
pub use field::FieldValue;
pub use query::{
    FilterClause, Operator, Predicate, SearchRequest, SortDirection, StoreFilter, WhereClause,
};
pub use record::Record;
pub use service::{CrudService, Page, RecordService};
pub use store::RecordStore;
