//! The `StringStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `sift-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  filter::FilterSet,
  record::{AnalyzedRecord, NewRecord},
};

/// Result of [`StringStore::insert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
  /// The record was stored; `created_at` has been assigned.
  Created(AnalyzedRecord),
  /// A record with the same content id or value already exists.
  Duplicate,
}

/// Abstraction over a Sift record store backend.
///
/// Records are append/delete only: there is no update operation. All methods
/// return `Send` futures so the trait can be used behind `axum`.
pub trait StringStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist an analyzed record, assigning its `created_at`.
  ///
  /// A uniqueness violation on id or value is reported as
  /// [`InsertOutcome::Duplicate`], never as an error.
  fn insert(
    &self,
    record: NewRecord,
  ) -> impl Future<Output = Result<InsertOutcome, Self::Error>> + Send + '_;

  /// Retrieve a record by its raw value. Returns `None` if not found.
  fn get_by_value<'a>(
    &'a self,
    value: &'a str,
  ) -> impl Future<Output = Result<Option<AnalyzedRecord>, Self::Error>> + Send + 'a;

  /// Delete a record by its raw value. Returns `false` if nothing was deleted.
  fn delete_by_value<'a>(
    &'a self,
    value: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Return every record matching all predicates in `filters`, newest first.
  fn query<'a>(
    &'a self,
    filters: &'a FilterSet,
  ) -> impl Future<Output = Result<Vec<AnalyzedRecord>, Self::Error>> + Send + 'a;
}
