//! Runtime configuration, deserialised from `holocron.toml` and the
//! environment.

use std::{
  num::{NonZeroU32, NonZeroUsize},
  path::PathBuf,
  time::Duration,
};

use serde::Deserialize;

use crate::{Error, Result, client::ClientConfig, mode::Mode, pipeline::PipelineSettings};

/// Everything one harvest run needs to know.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
  /// Root of the upstream API, e.g. `https://swapi.py4e.com/api/`.
  pub base_url:             String,
  pub total_count:          u32,
  pub batch_size:           u32,
  /// Pause before each batch, in milliseconds.
  pub throttle_ms:          u64,
  pub max_in_flight_loads:  usize,
  pub request_timeout_secs: u64,
  pub store_path:           PathBuf,
  pub mode:                 Mode,
}

impl Default for HarvestConfig {
  fn default() -> Self {
    Self {
      base_url:             "https://swapi.py4e.com/api/".into(),
      total_count:          100,
      batch_size:           10,
      throttle_ms:          200,
      max_in_flight_loads:  4,
      request_timeout_secs: 30,
      store_path:           PathBuf::from("holocron.db"),
      mode:                 Mode::Concurrent,
    }
  }
}

impl HarvestConfig {
  /// Validate the scheduling knobs and convert them for [`Pipeline`](crate::Pipeline).
  pub fn pipeline_settings(&self) -> Result<PipelineSettings> {
    if self.base_url.trim().is_empty() {
      return Err(Error::Config("base_url must not be empty".into()));
    }
    let batch_size = NonZeroU32::new(self.batch_size)
      .ok_or_else(|| Error::Config("batch_size must be at least 1".into()))?;
    let max_in_flight_loads = NonZeroUsize::new(self.max_in_flight_loads)
      .ok_or_else(|| Error::Config("max_in_flight_loads must be at least 1".into()))?;

    Ok(PipelineSettings {
      base_url: self.base_url.clone(),
      total_count: self.total_count,
      batch_size,
      throttle: Duration::from_millis(self.throttle_ms),
      max_in_flight_loads,
      mode: self.mode,
    })
  }

  pub fn client_config(&self) -> ClientConfig {
    ClientConfig {
      timeout: Duration::from_secs(self.request_timeout_secs),
    }
  }
}
