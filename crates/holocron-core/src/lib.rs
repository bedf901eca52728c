//! Core types and trait definitions for the Holocron harvester.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! upstream API and the persistence layer are reached through the
//! [`Fetcher`](fetch::Fetcher) and [`PersonStore`](store::PersonStore)
//! traits; everything else here is plain data and pure functions.

// Native `async fn` in traits; the `Send` bounds are spelled out by hand.
#![allow(async_fn_in_trait)]

pub mod batch;
pub mod error;
pub mod fetch;
pub mod person;
pub mod record;
pub mod reference;
pub mod store;

pub use error::{BoxError, Error, Result};
