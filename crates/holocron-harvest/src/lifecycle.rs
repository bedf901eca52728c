//! Scoped store lifecycle around one harvest.

use std::future::Future;

use holocron_core::store::PersonStore;

use crate::{Error, Result};

/// Reset the schema, run `body`, then close the store on every exit path.
///
/// `body` receives a clone of the store handle. If it fails, its error is
/// returned even when closing fails too; a close failure after a successful
/// body is returned on its own. A panic in `body` skips the explicit close,
/// but dropping the last handle still shuts the connection down.
pub async fn with_fresh_schema<S, B, Fut, T>(store: S, body: B) -> Result<T>
where
  S: PersonStore,
  B: FnOnce(S) -> Fut,
  Fut: Future<Output = Result<T>>,
{
  let outcome = match store.reset_schema().await {
    Ok(()) => {
      tracing::info!("schema reset");
      body(store.clone()).await
    }
    Err(e) => Err(Error::load(e)),
  };

  let closed = store.close().await.map_err(Error::load);

  match (outcome, closed) {
    (Ok(value), Ok(())) => Ok(value),
    (Ok(_), Err(e)) => Err(e),
    (Err(e), Ok(())) => Err(e),
    (Err(e), Err(close_err)) => {
      tracing::warn!(error = %close_err, "failed to close store after an aborted run");
      Err(e)
    }
  }
}
