//! Error type for `sift-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored column held a value that cannot be represented in the domain.
  #[error("corrupt column {column}: {value}")]
  Corrupt {
    column: &'static str,
    value:  i64,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
