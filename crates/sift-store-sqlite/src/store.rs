//! [`SqliteStore`] — the SQLite implementation of [`StringStore`].

use std::path::Path;

use chrono::{SubsecRound as _, Utc};
use rusqlite::{ErrorCode, OptionalExtension as _};
use sift_core::{
  filter::FilterSet,
  record::{AnalyzedRecord, NewRecord},
  store::{InsertOutcome, StringStore},
};

use crate::{
  Result,
  encode::{RECORD_COLUMNS, RawRecord, encode_count, encode_dt, encode_frequencies},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Sift record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    tracing::debug!(?path, "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn is_constraint_violation(err: &rusqlite::Error) -> bool {
  matches!(
    err,
    rusqlite::Error::SqliteFailure(e, _) if e.code == ErrorCode::ConstraintViolation
  )
}

// ─── StringStore impl ────────────────────────────────────────────────────────

impl StringStore for SqliteStore {
  type Error = crate::Error;

  async fn insert(&self, record: NewRecord) -> Result<InsertOutcome> {
    // Stored timestamps carry microsecond precision; truncate up front so the
    // returned record is identical to what a later read produces.
    let record = record.into_record(Utc::now().trunc_subsecs(6));

    let props          = &record.properties;
    let id             = record.id.clone();
    let value          = record.value.clone();
    let length         = encode_count(props.length);
    let is_palindrome  = props.is_palindrome;
    let unique_chars   = encode_count(props.unique_characters);
    let word_count     = encode_count(props.word_count);
    let sha256_hash    = props.sha256_hash.clone();
    let frequency_json = encode_frequencies(&props.character_frequency_map)?;
    let created_at     = encode_dt(record.created_at);

    let inserted: bool = self
      .conn
      .call(move |conn| {
        let res = conn.execute(
          "INSERT INTO strings (
             id, value, length, is_palindrome, unique_characters,
             word_count, sha256_hash, character_frequency_map, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            id,
            value,
            length,
            is_palindrome,
            unique_chars,
            word_count,
            sha256_hash,
            frequency_json,
            created_at,
          ],
        );
        match res {
          Ok(_) => Ok(true),
          Err(e) if is_constraint_violation(&e) => Ok(false),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if inserted {
      Ok(InsertOutcome::Created(record))
    } else {
      Ok(InsertOutcome::Duplicate)
    }
  }

  async fn get_by_value(&self, value: &str) -> Result<Option<AnalyzedRecord>> {
    let value = value.to_owned();

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {RECORD_COLUMNS} FROM strings WHERE value = ?1"),
            rusqlite::params![value],
            RawRecord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn delete_by_value(&self, value: &str) -> Result<bool> {
    let value = value.to_owned();

    let deleted: usize = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM strings WHERE value = ?1",
          rusqlite::params![value],
        )?)
      })
      .await?;

    Ok(deleted > 0)
  }

  async fn query(&self, filters: &FilterSet) -> Result<Vec<AnalyzedRecord>> {
    let is_palindrome = filters.is_palindrome;
    let min_length    = filters.min_length;
    let max_length    = filters.max_length;
    let word_count    = filters.word_count;

    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {RECORD_COLUMNS}
           FROM strings
           WHERE (?1 IS NULL OR is_palindrome = ?1)
             AND (?2 IS NULL OR length >= ?2)
             AND (?3 IS NULL OR length <= ?3)
             AND (?4 IS NULL OR word_count = ?4)
           ORDER BY created_at DESC, rowid DESC"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![is_palindrome, min_length, max_length, word_count],
            RawRecord::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    let mut records: Vec<AnalyzedRecord> = raws
      .into_iter()
      .map(RawRecord::into_record)
      .collect::<Result<_>>()?;

    // SQLite's lower() only folds ASCII; the character predicate is applied
    // here with full Unicode folding.
    if filters.contains_character.is_some() {
      records.retain(|r| filters.matches(r));
    }

    Ok(records)
  }
}
