//! Reference fields and their flattening rules.
//!
//! A reference field holds one or more URLs of related entities. Resolving it
//! means fetching each URL and reducing the fetched records to one string:
//! a record's attributes are joined with `", "`, records with `"; "`.

use serde_json::Value;

use crate::{Error, Result};

/// A field whose value points at other API resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceField {
  pub name:       &'static str,
  /// Attributes extracted from each referenced record, in output order.
  pub attributes: &'static [&'static str],
}

/// Every reference field of a person record.
pub const REFERENCE_FIELDS: &[ReferenceField] = &[
  ReferenceField { name: "homeworld", attributes: &["name"] },
  ReferenceField { name: "films",     attributes: &["title", "release_date"] },
  ReferenceField { name: "species",   attributes: &["name"] },
  ReferenceField { name: "vehicles",  attributes: &["name", "model"] },
  ReferenceField { name: "starships", attributes: &["name", "model"] },
];

const ATTRIBUTE_SEPARATOR: &str = ", ";
const RECORD_SEPARATOR: &str = "; ";

impl ReferenceField {
  /// The URLs held by `value`, or `None` if it is not a reference.
  ///
  /// A single string counts only when it points into the API at `base_url`;
  /// a list must hold nothing but URL strings.
  pub fn urls(&self, value: Option<&Value>, base_url: &str) -> Result<Option<Vec<String>>> {
    let Some(value) = value else { return Ok(None) };
    match value {
      Value::String(url) if url.starts_with(base_url) => Ok(Some(vec![url.clone()])),
      Value::Array(items) => items
        .iter()
        .map(|item| match item {
          Value::String(url) => Ok(url.clone()),
          other => Err(Error::InvalidReference { field: self.name, item: other.to_string() }),
        })
        .collect::<Result<Vec<_>>>()
        .map(Some),
      _ => Ok(None),
    }
  }

  /// Reduce the referenced records, paired with the URL each came from, to
  /// this field's display string.
  pub fn flatten<'a, I>(&self, referenced: I) -> Result<String>
  where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
  {
    let parts = referenced
      .into_iter()
      .map(|(url, record)| self.flatten_one(url, record))
      .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(RECORD_SEPARATOR))
  }

  fn flatten_one(&self, url: &str, record: &Value) -> Result<String> {
    let values = self
      .attributes
      .iter()
      .map(|&attribute| match record.get(attribute) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(Error::MissingAttribute {
          url: url.to_owned(),
          field: self.name,
          attribute,
        }),
        Some(other) => Ok(other.to_string()),
      })
      .collect::<Result<Vec<_>>>()?;
    Ok(values.join(ATTRIBUTE_SEPARATOR))
  }
}
