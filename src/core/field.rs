//! Field value types used by filter clauses and predicates

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
///
/// Variant order matters for untagged deserialization: `Uuid` and `DateTime`
/// are tried before the plain `String` fallback. That typed parse is only
/// wanted for client comparison operands ([`FieldValue::typed_from_json`]);
/// column values read from a record keep their strings verbatim
/// ([`FieldValue::from_json`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(untagged)]
pub enum FieldValue {
    Boolean(bool),
    Integer(i64),
    Float(f64),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    String(String),
    #[default]
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a float, widening integers
    pub fn as_float(&self) -> Option<f64> {
        match self {
            FieldValue::Float(f) => Some(*f),
            FieldValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Textual form used for substring matching.
    ///
    /// Null renders as the empty string.
    pub fn to_text(&self) -> String {
        match self {
            FieldValue::String(s) => s.clone(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map_or_else(|| f.to_string(), |n| n.to_string()),
            FieldValue::Boolean(b) => b.to_string(),
            FieldValue::Uuid(u) => u.to_string(),
            FieldValue::DateTime(dt) => dt.to_rfc3339(),
            FieldValue::Null => String::new(),
        }
    }

    /// Compare two values of compatible kinds.
    ///
    /// Integers and floats compare numerically with each other. Strings are
    /// compared lexically against strings, UUIDs and dates against their own
    /// kind or their textual form. Returns `None` for incompatible kinds and
    /// whenever either side is null.
    pub fn compare(&self, other: &FieldValue) -> Option<Ordering> {
        use FieldValue::*;

        match (self, other) {
            (Null, _) | (_, Null) => None,
            (Integer(a), Integer(b)) => Some(a.cmp(b)),
            (Integer(_) | Float(_), Integer(_) | Float(_)) => {
                self.as_float()?.partial_cmp(&other.as_float()?)
            }
            (Boolean(a), Boolean(b)) => Some(a.cmp(b)),
            (String(a), String(b)) => Some(a.cmp(b)),
            (Uuid(a), Uuid(b)) => Some(a.cmp(b)),
            (Uuid(a), String(b)) => Some(a.to_string().cmp(b)),
            (String(a), Uuid(b)) => Some(a.cmp(&b.to_string())),
            (DateTime(a), DateTime(b)) => Some(a.cmp(b)),
            (DateTime(a), String(b)) => b
                .parse::<chrono::DateTime<Utc>>()
                .ok()
                .map(|b| a.cmp(&b)),
            (String(a), DateTime(b)) => a
                .parse::<chrono::DateTime<Utc>>()
                .ok()
                .map(|a| a.cmp(b)),
            _ => None,
        }
    }

    /// Equality that tolerates numeric widening and textual UUIDs/dates
    pub fn loosely_equals(&self, other: &FieldValue) -> bool {
        if self.is_null() || other.is_null() {
            return self.is_null() && other.is_null();
        }
        self.compare(other) == Some(Ordering::Equal)
    }

    /// Convert a JSON scalar into a field value, keeping strings verbatim.
    ///
    /// Arrays and objects have no scalar form and map to `Null`.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Boolean(*b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => FieldValue::Integer(i),
                None => n.as_f64().map(FieldValue::Float).unwrap_or_default(),
            },
            Value::String(s) => FieldValue::String(s.clone()),
            Value::Array(_) | Value::Object(_) => FieldValue::Null,
        }
    }

    /// Parse a JSON scalar as a comparison operand.
    ///
    /// Strings that read as UUIDs or RFC 3339 dates become typed values so
    /// they compare by value rather than by spelling. Returns `None` for
    /// arrays and objects.
    pub fn typed_from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Array(_) | Value::Object(_) => None,
            scalar => serde_json::from_value(scalar.clone()).ok(),
        }
    }

    /// Text of a JSON scalar exactly as the client sent it.
    ///
    /// Used as the needle of substring predicates. Returns `None` for arrays
    /// and objects.
    pub fn raw_text(value: &Value) -> Option<String> {
        match value {
            Value::Array(_) | Value::Object(_) => None,
            Value::String(s) => Some(s.clone()),
            scalar => Some(FieldValue::from_json(scalar).to_text()),
        }
    }
}

impl From<FieldValue> for Value {
    fn from(value: FieldValue) -> Self {
        match value {
            FieldValue::Boolean(b) => Value::Bool(b),
            FieldValue::Integer(i) => Value::from(i),
            FieldValue::Float(f) => serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number),
            FieldValue::Uuid(u) => Value::String(u.to_string()),
            FieldValue::DateTime(dt) => {
                Value::String(dt.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true))
            }
            FieldValue::String(s) => Value::String(s),
            FieldValue::Null => Value::Null,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Boolean(value)
    }
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}
