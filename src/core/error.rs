//! Typed error handling for crudbase
//!
//! Services and stores return `anyhow::Result` and never translate errors
//! themselves: whatever the store raised reaches the caller unchanged. The
//! types in this module are what the bundled stores raise, and
//! [`CrudError`] doubles as the response-level translation that turns an
//! error into a failure [`Envelope`].
//!
//! # Error Categories
//!
//! - [`RecordError`]: Errors about individual records (missing, duplicate, bad shape)
//! - [`StorageError`]: Errors from a storage backend
//! - [`ConfigError`]: Errors loading configuration
//!
//! # Example
//!
//! ```rust,ignore
//! async fn show(service: &RecordService<User>, id: Uuid) -> Response {
//!     match service.find_by_id(&id).await {
//!         Ok(envelope) => envelope.into_response(),
//!         Err(e) => CrudError::from_anyhow(e).into_response(),
//!     }
//! }
//! ```

use crate::core::envelope::Envelope;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use std::fmt;
use uuid::Uuid;

/// The main error type of the crate
#[derive(Debug)]
pub enum CrudError {
    /// Record-level errors
    Record(RecordError),

    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Anything else that reached the response layer
    Internal(String),
}

impl fmt::Display for CrudError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrudError::Record(e) => write!(f, "{}", e),
            CrudError::Storage(e) => write!(f, "{}", e),
            CrudError::Config(e) => write!(f, "{}", e),
            CrudError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for CrudError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CrudError::Record(e) => Some(e),
            CrudError::Storage(e) => Some(e),
            CrudError::Config(e) => Some(e),
            CrudError::Internal(_) => None,
        }
    }
}

impl CrudError {
    /// Recover a typed error from an `anyhow` chain.
    ///
    /// Errors that did not originate from this crate become `Internal`.
    pub fn from_anyhow(err: anyhow::Error) -> Self {
        match err.downcast::<CrudError>() {
            Ok(e) => e,
            Err(err) => match err.downcast::<RecordError>() {
                Ok(e) => CrudError::Record(e),
                Err(err) => match err.downcast::<StorageError>() {
                    Ok(e) => CrudError::Storage(e),
                    Err(err) => match err.downcast::<ConfigError>() {
                        Ok(e) => CrudError::Config(e),
                        Err(err) => CrudError::Internal(format!("{:#}", err)),
                    },
                },
            },
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CrudError::Record(e) => e.status_code(),
            CrudError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CrudError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CrudError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            CrudError::Record(e) => e.error_code(),
            CrudError::Storage(_) => "STORAGE_ERROR",
            CrudError::Config(_) => "CONFIG_ERROR",
            CrudError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Render as a failure envelope carrying the HTTP status as its code
    pub fn to_envelope<D>(&self) -> Envelope<D> {
        Envelope::fail(i32::from(self.status_code().as_u16()), self.to_string())
    }
}

impl IntoResponse for CrudError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        tracing::debug!(code = self.error_code(), error = %self, "request failed");
        let body = Json(self.to_envelope::<()>());
        (status, body).into_response()
    }
}

// =============================================================================
// Record Errors
// =============================================================================

/// Errors about individual records
#[derive(Debug)]
pub enum RecordError {
    /// No record with this id
    NotFound { resource: String, id: Uuid },

    /// A record with this id already exists
    AlreadyExists { resource: String, id: Uuid },

    /// Failed to serialize/deserialize a record
    Serialization { resource: String, message: String },
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordError::NotFound { resource, id } => {
                write!(f, "{} with id '{}' not found", resource, id)
            }
            RecordError::AlreadyExists { resource, id } => {
                write!(f, "{} with id '{}' already exists", resource, id)
            }
            RecordError::Serialization { resource, message } => {
                write!(f, "Failed to serialize/deserialize {}: {}", resource, message)
            }
        }
    }
}

impl std::error::Error for RecordError {}

impl RecordError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            RecordError::NotFound { .. } => StatusCode::NOT_FOUND,
            RecordError::AlreadyExists { .. } => StatusCode::CONFLICT,
            RecordError::Serialization { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::NotFound { .. } => "RECORD_NOT_FOUND",
            RecordError::AlreadyExists { .. } => "RECORD_ALREADY_EXISTS",
            RecordError::Serialization { .. } => "RECORD_SERIALIZATION_ERROR",
        }
    }
}

impl From<RecordError> for CrudError {
    fn from(err: RecordError) -> Self {
        CrudError::Record(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by storage backends
#[derive(Debug)]
pub enum StorageError {
    /// Connection error
    Connection { backend: String, message: String },

    /// Query execution error
    Query { backend: String, message: String },

    /// A lock guarding in-process state was poisoned
    LockPoisoned { backend: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Connection { backend, message } => {
                write!(f, "{} connection error: {}", backend, message)
            }
            StorageError::Query { backend, message } => {
                write!(f, "{} query error: {}", backend, message)
            }
            StorageError::LockPoisoned { backend } => {
                write!(f, "{} lock poisoned", backend)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for CrudError {
    fn from(err: StorageError) -> Self {
        CrudError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors loading configuration
#[derive(Debug)]
pub enum ConfigError {
    /// The file could not be read
    Io { path: String, message: String },

    /// The content is not valid YAML for the expected shape
    Parse { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, message } => {
                write!(f, "Failed to read config file '{}': {}", path, message)
            }
            ConfigError::Parse { message } => write!(f, "Invalid configuration: {}", message),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for CrudError {
    fn from(err: ConfigError) -> Self {
        CrudError::Config(err)
    }
}
