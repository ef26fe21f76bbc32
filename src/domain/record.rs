// src/domain/record.rs
//
// Record schema boundary
//
// Remote collections hand back loosely-typed documents. Every record type
// decodes itself from a `Document` here, so nothing untyped ever reaches the
// Record Store.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{DomainError, DomainResult};

/// Field map of a remote document
pub type Fields = serde_json::Map<String, Value>;

/// A document as returned by the Document Collection Service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    #[serde(default)]
    pub fields: Fields,
}

impl Document {
    pub fn new(id: impl Into<String>, fields: Fields) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }
}

/// Sort direction for a collection fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Ordering requested from the collection on fetch-all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: SortDirection,
}

impl OrderBy {
    pub fn desc(field: &str) -> Self {
        Self {
            field: field.to_string(),
            direction: SortDirection::Desc,
        }
    }
}

/// A typed record held by the Record Store
pub trait Record: Clone + std::fmt::Debug + Send + Sync + 'static {
    /// Name of the remote collection this record lives in
    const COLLECTION: &'static str;

    /// Immutable identifier, unique within a store
    fn id(&self) -> &str;

    /// Decode and validate a remote document
    fn from_document(document: Document) -> DomainResult<Self>;

    /// Ordering the collection should apply on fetch-all, if any
    fn fetch_order() -> Option<OrderBy> {
        None
    }
}

// ============================================================================
// FIELD READERS
// ============================================================================

fn invalid(key: &str, expected: &str, value: &Value) -> DomainError {
    DomainError::InvalidField {
        field: key.to_string(),
        reason: format!("expected {}, got {}", expected, value),
    }
}

/// Optional string field. `null` and absent are both `None`.
pub fn read_string(fields: &Fields, key: &str) -> DomainResult<Option<String>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(invalid(key, "string", other)),
    }
}

/// Required string field, empty allowed
pub fn require_string(fields: &Fields, key: &str) -> DomainResult<String> {
    read_string(fields, key)?.ok_or_else(|| DomainError::MissingField(key.to_string()))
}

/// Optional numeric field.
///
/// Numeric strings are coerced. Empty strings read as unset.
pub fn read_number(fields: &Fields, key: &str) -> DomainResult<Option<f64>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| invalid(key, "number", &Value::Number(n.clone()))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(value @ Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| invalid(key, "number", value)),
        Some(other) => Err(invalid(key, "number", other)),
    }
}

/// Optional list of strings. Absent reads as empty.
pub fn read_string_list(fields: &Fields, key: &str) -> DomainResult<Vec<String>> {
    match fields.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(invalid(key, "string list", other)),
            })
            .collect(),
        Some(other) => Err(invalid(key, "string list", other)),
    }
}

/// Optional timestamp.
///
/// Accepts RFC 3339 strings, epoch milliseconds, and the
/// `{ "seconds": .., "nanoseconds": .. }` shape document stores emit.
pub fn read_timestamp(fields: &Fields, key: &str) -> DomainResult<Option<DateTime<Utc>>> {
    let value = match fields.get(key) {
        None | Some(Value::Null) => return Ok(None),
        Some(value) => value,
    };

    let parsed = match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        Value::Object(obj) => {
            let seconds = obj
                .get("seconds")
                .or_else(|| obj.get("_seconds"))
                .and_then(Value::as_i64);
            let nanos = obj
                .get("nanoseconds")
                .or_else(|| obj.get("_nanoseconds"))
                .map(|n| n.as_u64().and_then(|n| u32::try_from(n).ok()))
                .unwrap_or(Some(0));
            seconds
                .zip(nanos)
                .and_then(|(s, n)| Utc.timestamp_opt(s, n).single())
        }
        _ => None,
    };

    parsed
        .map(Some)
        .ok_or_else(|| invalid(key, "timestamp", value))
}

pub fn timestamp_value(at: DateTime<Utc>) -> Value {
    Value::String(at.to_rfc3339())
}
