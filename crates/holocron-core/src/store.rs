//! The `PersonStore` trait.
//!
//! Implemented by storage backends (e.g. `holocron-store-sqlite`). The
//! harvester depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::person::PersonRow;

/// Abstraction over the relational store that receives harvested people.
///
/// Handles are expected to be cheap to clone; concurrent loads each hold
/// their own clone.
pub trait PersonStore: Clone + Send + Sync + 'static {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Drop and recreate the `person` table. All existing rows are lost.
  fn reset_schema(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert `rows` in a single transaction and commit it.
  ///
  /// Either every row is stored or none is; a duplicate `name` fails the
  /// whole call.
  fn insert_people(
    &self,
    rows: Vec<PersonRow>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  fn count_people(&self) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// All stored rows ordered by `id`.
  fn list_people(&self) -> impl Future<Output = Result<Vec<PersonRow>, Self::Error>> + Send + '_;

  /// Release the underlying connection. Other clones of this handle fail
  /// afterwards.
  fn close(self) -> impl Future<Output = Result<(), Self::Error>> + Send;
}
