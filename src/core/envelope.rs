//! Uniform `{code, message, data}` response wrapper

use axum::Json;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status codes carried in the `code` field of an [`Envelope`]
pub struct StatusCode;

impl StatusCode {
    /// Code used by every successful envelope
    pub const SUCCESS: i32 = 200;
}

/// Message used when the caller does not supply one
pub const DEFAULT_MESSAGE: &str = "success";

/// Response envelope returned by every service operation
///
/// # Example
/// ```rust,ignore
/// let ok = Envelope::success(json!({"id": 1}));
/// // {"code": 200, "message": "success", "data": {"id": 1}}
///
/// let err = Envelope::<()>::fail(404, "not found");
/// // {"code": 404, "message": "not found"}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<D> {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<D>,
}

impl<D> Envelope<D> {
    /// Wrap `data` with the success code and the default message
    pub fn success(data: D) -> Self {
        Self::success_with(data, DEFAULT_MESSAGE)
    }

    /// Wrap `data` with the success code and a custom message
    pub fn success_with(data: D, message: impl Into<String>) -> Self {
        Self {
            code: StatusCode::SUCCESS,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Build a failure envelope. The code is taken as given.
    pub fn fail(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == StatusCode::SUCCESS
    }

    /// Transform the payload, keeping code and message
    pub fn map<E>(self, f: impl FnOnce(D) -> E) -> Envelope<E> {
        Envelope {
            code: self.code,
            message: self.message,
            data: self.data.map(f),
        }
    }
}

impl Envelope<Value> {
    /// Success envelope with an empty object as payload
    pub fn ok() -> Self {
        Self::success(Value::Object(Default::default()))
    }
}

impl<D: Serialize> IntoResponse for Envelope<D> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
