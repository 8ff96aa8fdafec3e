//! Error types for `sift-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A structured filter parameter was present but malformed.
  #[error("invalid value for {name}: {reason}")]
  InvalidParameter {
    name:   &'static str,
    reason: String,
  },

  /// No natural-language rule produced a filter for this text.
  #[error("unable to parse natural language query: {0:?}")]
  UnparseableQuery(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
