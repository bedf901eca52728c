//! The batch pipeline: throttle, fetch, resolve, hand off to the loader.
//!
//! Batches are fetched strictly one after another. In concurrent mode each
//! enriched batch is loaded on a background task while the next batch is
//! being fetched; at most `max_in_flight_loads` such tasks exist at once.

use std::{
  num::{NonZeroU32, NonZeroUsize},
  time::Duration,
};

use chrono::Utc;
use holocron_core::{
  batch::{Batch, batch_count, batches},
  fetch::Fetcher,
  record::{EnrichedRecord, RawRecord},
  store::PersonStore,
};
use tokio::task::JoinSet;

use crate::{
  Error, Result,
  client::person_url,
  loader::{LoadOutcome, Loader},
  mode::Mode,
  report::HarvestReport,
  resolver::Resolver,
};

/// Validated scheduling parameters for one run.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
  pub base_url:            String,
  pub total_count:         u32,
  pub batch_size:          NonZeroU32,
  /// Fixed pause before every batch's fetch phase.
  pub throttle:            Duration,
  pub max_in_flight_loads: NonZeroUsize,
  pub mode:                Mode,
}

type LoadTasks = JoinSet<Result<LoadOutcome>>;

/// Drives a full harvest of people `1..=total_count`.
pub struct Pipeline<F, S> {
  fetcher:  F,
  loader:   Loader<S>,
  settings: PipelineSettings,
}

#[derive(Default)]
struct Tally {
  fetched: usize,
  loaded:  LoadOutcome,
}

impl<F: Fetcher, S: PersonStore> Pipeline<F, S> {
  pub fn new(fetcher: F, store: S, settings: PipelineSettings) -> Self {
    Self { fetcher, loader: Loader::new(store), settings }
  }

  /// Harvest every batch and wait for all of their loads.
  ///
  /// The first failure ends the run. Loads already dispatched are still
  /// awaited before it is returned.
  pub async fn run(&self) -> Result<HarvestReport> {
    let started_at = Utc::now();
    let clock = tokio::time::Instant::now();
    let s = &self.settings;

    tracing::info!(
      %started_at,
      total = s.total_count,
      batch_size = s.batch_size.get(),
      throttle_ms = s.throttle.as_millis() as u64,
      mode = %s.mode,
      "starting harvest"
    );

    let mut tally = Tally::default();
    match s.mode {
      Mode::Concurrent => self.run_overlapped(&mut tally).await?,
      Mode::Sequential => self.run_in_order(&mut tally).await?,
    }

    let report = HarvestReport {
      started_at,
      mode: s.mode,
      batches: batch_count(s.total_count, s.batch_size),
      fetched: tally.fetched,
      inserted: tally.loaded.inserted,
      skipped: tally.loaded.skipped,
      elapsed: clock.elapsed(),
    };
    tracing::info!(
      started_at = %report.started_at,
      batches = report.batches,
      fetched = report.fetched,
      inserted = report.inserted,
      skipped = report.skipped,
      elapsed_ms = report.elapsed.as_millis() as u64,
      "harvest finished"
    );
    Ok(report)
  }

  /// Concurrent mode: loads run in the background, overlapping later
  /// fetches.
  async fn run_overlapped(&self, tally: &mut Tally) -> Result<()> {
    let mut loads = LoadTasks::new();
    let dispatched = self.dispatch_all(&mut loads, tally).await;
    let joined = join_loads(&mut loads, tally).await;
    // A dispatch error outranks whatever the drained loads reported.
    dispatched.and(joined)
  }

  async fn dispatch_all(&self, loads: &mut LoadTasks, tally: &mut Tally) -> Result<()> {
    let limit = self.settings.max_in_flight_loads.get();

    for batch in batches(self.settings.total_count, self.settings.batch_size) {
      let enriched = self.harvest_batch(&batch).await?;
      tally.fetched += batch.len();

      // Surface finished loads early, then wait for a free slot.
      while let Some(done) = loads.try_join_next() {
        tally.loaded += done??;
      }
      while loads.len() >= limit {
        let Some(done) = loads.join_next().await else { break };
        tally.loaded += done??;
      }

      let loader = self.loader.clone();
      let index = batch.index;
      loads.spawn(async move {
        let outcome = loader.load(enriched).await;
        tracing::debug!(batch = index + 1, ok = outcome.is_ok(), "load finished");
        outcome
      });
    }
    Ok(())
  }

  /// Sequential mode: each batch is loaded before the next is fetched.
  async fn run_in_order(&self, tally: &mut Tally) -> Result<()> {
    for batch in batches(self.settings.total_count, self.settings.batch_size) {
      let enriched = self.harvest_batch(&batch).await?;
      tally.fetched += batch.len();
      tally.loaded += self.loader.load(enriched).await?;
    }
    Ok(())
  }

  /// Throttle, then fetch and resolve every record of `batch`, in ID order.
  async fn harvest_batch(&self, batch: &Batch) -> Result<Vec<EnrichedRecord>> {
    tokio::time::sleep(self.settings.throttle).await;
    tracing::info!(
      batch = batch.index + 1,
      first = ?batch.ids.first(),
      last = ?batch.ids.last(),
      "fetching batch"
    );

    let mode = self.settings.mode;
    let records: Vec<RawRecord> = mode
      .run_all(batch.ids.iter().copied(), |id| self.fetch_person(id))
      .await?;

    let resolver = Resolver::new(&self.fetcher, &self.settings.base_url, mode);
    mode
      .run_all(records, |record| resolver.resolve(record))
      .await
  }

  async fn fetch_person(&self, id: u32) -> Result<RawRecord> {
    let url = person_url(&self.settings.base_url, id);
    let body = self.fetcher.fetch(&url).await?;
    Ok(RawRecord::from_json(id, &url, body)?)
  }
}

/// Wait for every outstanding load, keeping the first error.
async fn join_loads(loads: &mut LoadTasks, tally: &mut Tally) -> Result<()> {
  let mut first_err = None;
  while let Some(done) = loads.join_next().await {
    match done.map_err(Error::from).and_then(|outcome| outcome) {
      Ok(outcome) => tally.loaded += outcome,
      Err(e) => {
        tracing::warn!(error = %e, "background load failed");
        first_err.get_or_insert(e);
      }
    }
  }
  first_err.map_or(Ok(()), Err)
}
