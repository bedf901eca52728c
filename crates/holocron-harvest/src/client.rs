//! Async HTTP client for the upstream people API.

use std::time::Duration;

use holocron_core::{Error as CoreError, fetch::Fetcher};
use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// Connection settings for the upstream API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  /// Whole-request timeout, connect through body.
  pub timeout: Duration,
}

impl Default for ClientConfig {
  fn default() -> Self { Self { timeout: Duration::from_secs(30) } }
}

/// Async HTTP client for the upstream JSON API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based, so every
/// clone shares one connection pool.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
}

impl ApiClient {
  pub fn new(config: &ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .map_err(Error::Client)?;
    Ok(Self { client })
  }

  async fn get_json(&self, url: &str) -> holocron_core::Result<Value> {
    let network = |e: reqwest::Error| CoreError::Network {
      url:    url.to_owned(),
      source: Box::new(e),
    };

    let resp = self.client.get(url).send().await.map_err(network)?;

    // Missing entities come back as 404 with a JSON body; the status is
    // logged and the body decoded like any other.
    let status = resp.status();
    tracing::debug!(%url, %status, "GET");

    let body = resp.bytes().await.map_err(network)?;
    serde_json::from_slice(&body).map_err(|source| CoreError::Decode {
      url: url.to_owned(),
      source,
    })
  }
}

impl Fetcher for ApiClient {
  async fn fetch(&self, url: &str) -> holocron_core::Result<Value> {
    self.get_json(url).await
  }
}

/// URL of the primary record for person `id`.
pub fn person_url(base_url: &str, id: u32) -> String {
  format!("{}/people/{id}/", base_url.trim_end_matches('/'))
}
