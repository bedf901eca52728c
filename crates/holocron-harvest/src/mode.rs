//! Concurrent versus sequential scheduling.

use std::future::Future;

use futures::future::try_join_all;
use serde::Deserialize;

/// How a harvest schedules its network and database work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
  /// Requests within a batch run concurrently; loads overlap the next batch.
  #[default]
  Concurrent,
  /// One request at a time; each batch is loaded before the next starts.
  Sequential,
}

impl Mode {
  /// Run `f` over every item, all at once or one after another.
  ///
  /// Results keep input order either way. The first error wins; in
  /// concurrent mode the remaining futures are dropped.
  pub(crate) async fn run_all<I, F, Fut, T, E>(self, items: I, mut f: F) -> Result<Vec<T>, E>
  where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
  {
    match self {
      Mode::Concurrent => try_join_all(items.into_iter().map(f)).await,
      Mode::Sequential => {
        let mut out = Vec::new();
        for item in items {
          out.push(f(item).await?);
        }
        Ok(out)
      }
    }
  }
}

impl std::fmt::Display for Mode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(match self {
      Mode::Concurrent => "concurrent",
      Mode::Sequential => "sequential",
    })
  }
}
