//! Run summary and elapsed-time formatting.

use std::{future::Future, time::Duration};

use chrono::{DateTime, Utc};

use crate::mode::Mode;

/// What one harvest did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvestReport {
  pub started_at: DateTime<Utc>,
  pub mode:       Mode,
  pub batches:    usize,
  /// Primary records fetched, found or not.
  pub fetched:    usize,
  pub inserted:   usize,
  pub skipped:    usize,
  /// Wall-clock time from the first throttle to the last committed load.
  pub elapsed:    Duration,
}

/// Await `work` and measure how long it took.
///
/// The binary wraps store open, schema reset, the run and close in one
/// call, so the printed total covers the whole process.
pub async fn timed<T>(work: impl Future<Output = T>) -> (T, Duration) {
  let clock = tokio::time::Instant::now();
  let output = work.await;
  (output, clock.elapsed())
}

/// Format a duration as `H:MM:SS.ffffff`.
pub fn format_elapsed(elapsed: Duration) -> String {
  let secs = elapsed.as_secs();
  let (hours, minutes, seconds) = (secs / 3600, secs / 60 % 60, secs % 60);
  let micros = elapsed.subsec_micros();
  if micros == 0 {
    format!("{hours}:{minutes:02}:{seconds:02}")
  } else {
    format!("{hours}:{minutes:02}:{seconds:02}.{micros:06}")
  }
}
