//! The loader: enriched batch in, one committed transaction out.

use holocron_core::{person::PersonRow, record::EnrichedRecord, store::PersonStore};

use crate::{Error, Result};

/// Counts from one [`Loader::load`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadOutcome {
  pub inserted: usize,
  /// Records dropped because the API had no entity for their ID.
  pub skipped:  usize,
}

impl std::ops::AddAssign for LoadOutcome {
  fn add_assign(&mut self, rhs: Self) {
    self.inserted += rhs.inserted;
    self.skipped += rhs.skipped;
  }
}

/// Writes enriched batches into a [`PersonStore`].
///
/// Cheap to clone whenever the store handle is; each background load owns
/// its own clone.
#[derive(Clone)]
pub struct Loader<S> {
  store: S,
}

impl<S: PersonStore> Loader<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// Insert every real entity of `batch` in one transaction.
  ///
  /// Near-empty records (the API's `{"detail": "Not found"}` answer) are
  /// skipped. A batch with nothing left to insert never touches the store.
  pub async fn load(&self, batch: Vec<EnrichedRecord>) -> Result<LoadOutcome> {
    let (entities, missing): (Vec<_>, Vec<_>) =
      batch.into_iter().partition(EnrichedRecord::is_entity);

    for record in &missing {
      tracing::warn!(id = record.id, "no entity upstream, skipping");
    }

    let rows: Vec<PersonRow> = entities.iter().map(PersonRow::from_enriched).collect();
    let outcome = LoadOutcome { inserted: rows.len(), skipped: missing.len() };

    if rows.is_empty() {
      return Ok(outcome);
    }

    self.store.insert_people(rows).await.map_err(Error::load)?;
    tracing::debug!(inserted = outcome.inserted, skipped = outcome.skipped, "batch loaded");
    Ok(outcome)
  }
}
