//! The Holocron harvester.
//!
//! Pulls people from the upstream API in throttled batches, resolves each
//! record's references (homeworld, films, species, vehicles, starships) into
//! flattened strings, and loads the result into a [`PersonStore`].
//!
//! [`PersonStore`]: holocron_core::store::PersonStore

pub mod client;
pub mod config;
pub mod error;
pub mod lifecycle;
pub mod loader;
pub mod mode;
pub mod pipeline;
pub mod report;
pub mod resolver;

pub use client::{ApiClient, ClientConfig};
pub use config::HarvestConfig;
pub use error::{Error, Result};
pub use lifecycle::with_fresh_schema;
pub use mode::Mode;
pub use pipeline::{Pipeline, PipelineSettings};
pub use report::{HarvestReport, format_elapsed, timed};
