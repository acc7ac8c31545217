//! Record trait defining the core abstraction for persisted entity types

use crate::core::field::FieldValue;
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// Base trait for every entity type handled by a [`RecordService`].
///
/// A record is identified by a UUID primary key and exposes its columns by
/// name so that filters can be evaluated against it. Records travel through
/// the envelope and the storage backends in their serde form.
///
/// [`RecordService`]: crate::core::service::RecordService
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// The resource name used for storage and logging (e.g., "users")
    fn resource_name() -> &'static str;

    /// Get the primary key of this record
    fn id(&self) -> Uuid;

    /// Get the value of a column by name.
    ///
    /// The default implementation reads the field from the serialized JSON
    /// form of the record. Override it for computed columns or to avoid the
    /// serialization round trip on hot paths.
    fn field_value(&self, field: &str) -> Option<FieldValue> {
        let json = serde_json::to_value(self).ok()?;
        json.get(field).map(FieldValue::from_json)
    }
}
