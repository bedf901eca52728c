//! Error types for `holocron-core`.

use thiserror::Error;

/// Boxed error used where a collaborator's concrete error type is erased.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  /// The request never produced a readable response body.
  #[error("request to {url} failed: {source}")]
  Network {
    url:    String,
    #[source]
    source: BoxError,
  },

  #[error("response from {url} is not a valid record: {source}")]
  Decode {
    url:    String,
    #[source]
    source: serde_json::Error,
  },

  /// A referenced record lacks one of the attributes its field flattens.
  #[error("record at {url} has no {attribute:?} attribute (needed by {field:?})")]
  MissingAttribute {
    url:       String,
    field:     &'static str,
    attribute: &'static str,
  },

  /// A reference list holds something other than a URL string.
  #[error("{field:?} holds a non-URL reference: {item}")]
  InvalidReference {
    field: &'static str,
    item:  String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
