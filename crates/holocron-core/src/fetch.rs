//! The `Fetcher` trait: one GET, one JSON document.

use std::future::Future;

use serde_json::Value;

use crate::Result;

/// Abstraction over the upstream HTTP API.
///
/// Implementations report transport failures as
/// [`Error::Network`](crate::Error::Network) and unparseable bodies as
/// [`Error::Decode`](crate::Error::Decode). They must not retry and must not
/// reject a response for its status code alone: the API signals a missing
/// entity with a small JSON body, which callers inspect themselves.
pub trait Fetcher: Send + Sync {
  fn fetch<'a>(
    &'a self,
    url: &'a str,
  ) -> impl Future<Output = Result<Value>> + Send + 'a;
}

impl<F: Fetcher> Fetcher for &F {
  fn fetch<'a>(
    &'a self,
    url: &'a str,
  ) -> impl Future<Output = Result<Value>> + Send + 'a {
    (**self).fetch(url)
  }
}
