//! Upstream records before and after reference resolution.
//!
//! Both shapes keep the JSON object exactly as the API returned it; only
//! the reference fields change between them.

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Placeholder strings the API uses for "no value".
pub const SENTINELS: &[&str] = &["", "none", "unknown", "n/a"];

/// One primary entity as returned by the upstream API.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
  /// The ID the record was requested under.
  pub id:     u32,
  pub fields: Map<String, Value>,
}

impl RawRecord {
  /// Wrap a fetched JSON body. Anything but a JSON object is a decode error.
  pub fn from_json(id: u32, url: &str, body: Value) -> Result<Self> {
    let fields = serde_json::from_value(body).map_err(|source| Error::Decode {
      url: url.to_owned(),
      source,
    })?;
    Ok(Self { id, fields })
  }
}

/// A [`RawRecord`] whose reference fields hold flattened strings.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecord {
  pub id:     u32,
  pub fields: Map<String, Value>,
}

impl EnrichedRecord {
  /// Number of keys in the record, populated or not.
  ///
  /// The API answers unknown IDs with a one-key `{"detail": "Not found"}`
  /// object, so anything below two keys is not an entity.
  pub fn field_count(&self) -> usize { self.fields.len() }

  pub fn is_entity(&self) -> bool { self.field_count() >= 2 }
}

/// Project a JSON value onto a nullable text column.
///
/// Nulls, sentinel strings and empty containers become `None`; other
/// strings pass through unchanged and remaining values keep their JSON text.
pub fn normalize(value: &Value) -> Option<String> {
  match value {
    Value::Null => None,
    Value::String(s) if SENTINELS.contains(&s.as_str()) => None,
    Value::String(s) => Some(s.clone()),
    Value::Array(items) if items.is_empty() => None,
    Value::Object(map) if map.is_empty() => None,
    other => Some(other.to_string()),
  }
}
