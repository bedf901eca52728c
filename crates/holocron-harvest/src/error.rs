//! Error type for `holocron-harvest`.

use holocron_core::BoxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Fetch, decode and reference-resolution failures.
  #[error(transparent)]
  Core(#[from] holocron_core::Error),

  #[error("load failed: {0}")]
  Load(#[source] BoxError),

  /// A spawned load task panicked or was cancelled.
  #[error("load task failed: {0}")]
  Task(#[from] tokio::task::JoinError),

  #[error("failed to build HTTP client: {0}")]
  Client(#[source] reqwest::Error),

  #[error("invalid configuration: {0}")]
  Config(String),
}

impl Error {
  /// Wrap a persistence-layer failure.
  pub fn load(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Error::Load(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
