//! holocron harvester binary.
//!
//! Reads `holocron.toml` (or the path specified with `--config`), resets the
//! person table in the configured SQLite file, harvests people from the
//! upstream API and prints how long the whole run took.
//!
//! Every setting can be overridden from the environment, e.g.
//!
//! ```sh
//! HOLOCRON_TOTAL_COUNT=25 HOLOCRON_MODE=sequential cargo run -p holocron-harvest
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use holocron_core::store::PersonStore;
use holocron_harvest::{
  ApiClient, HarvestConfig, Pipeline, format_elapsed, timed, with_fresh_schema,
};
use holocron_store_sqlite::SqliteStore;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Harvest people from SWAPI into SQLite")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "holocron.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("HOLOCRON"))
    .build()
    .context("failed to read config file")?;

  let harvest_cfg: HarvestConfig = settings
    .try_deserialize()
    .context("failed to deserialise HarvestConfig")?;

  let pipeline_settings = harvest_cfg
    .pipeline_settings()
    .context("invalid harvest settings")?;
  let mode = pipeline_settings.mode;

  let api = ApiClient::new(&harvest_cfg.client_config())?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&harvest_cfg.store_path);

  // Time the whole run, store open and close included.
  let (outcome, elapsed) = timed(async move {
    let store = SqliteStore::open(&store_path)
      .await
      .with_context(|| format!("failed to open store at {store_path:?}"))?;

    with_fresh_schema(store, |store| async move {
      let report = Pipeline::new(api, store.clone(), pipeline_settings)
        .run()
        .await?;
      let stored = store
        .count_people()
        .await
        .map_err(holocron_harvest::Error::load)?;
      tracing::info!(stored, "rows in person table");
      Ok::<_, holocron_harvest::Error>(report)
    })
    .await
    .context("harvest failed")
  })
  .await;
  let report = outcome?;
  tracing::debug!(pipeline_ms = report.elapsed.as_millis() as u64, "pipeline time");

  println!(
    "\nTotal harvest time ({mode}): {}",
    format_elapsed(elapsed)
  );

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
