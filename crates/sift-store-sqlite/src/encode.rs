//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as fixed-width RFC 3339 strings (microsecond
//! precision, `Z` suffix) so that lexical order matches chronological order.
//! The character frequency map is stored as compact JSON.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use sift_core::record::{AnalyzedRecord, Properties};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Frequency map ───────────────────────────────────────────────────────────

pub fn encode_frequencies(map: &BTreeMap<char, usize>) -> Result<String> {
  Ok(serde_json::to_string(map)?)
}

pub fn decode_frequencies(s: &str) -> Result<BTreeMap<char, usize>> {
  Ok(serde_json::from_str(s)?)
}

// ─── Counts ──────────────────────────────────────────────────────────────────

pub fn encode_count(n: usize) -> i64 { n as i64 }

fn decode_count(column: &'static str, value: i64) -> Result<usize> {
  usize::try_from(value).map_err(|_| Error::Corrupt { column, value })
}

// ─── Raw row types ───────────────────────────────────────────────────────────

/// The column list shared by every `SELECT` that produces a [`RawRecord`].
pub const RECORD_COLUMNS: &str = "id, value, length, is_palindrome, \
  unique_characters, word_count, sha256_hash, character_frequency_map, \
  created_at";

/// A `strings` row as read from SQLite, before decoding.
pub struct RawRecord {
  pub id:                      String,
  pub value:                   String,
  pub length:                  i64,
  pub is_palindrome:           bool,
  pub unique_characters:       i64,
  pub word_count:              i64,
  pub sha256_hash:             String,
  pub character_frequency_map: String,
  pub created_at:              String,
}

impl RawRecord {
  /// Build from a row selected with [`RECORD_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:                      row.get(0)?,
      value:                   row.get(1)?,
      length:                  row.get(2)?,
      is_palindrome:           row.get(3)?,
      unique_characters:       row.get(4)?,
      word_count:              row.get(5)?,
      sha256_hash:             row.get(6)?,
      character_frequency_map: row.get(7)?,
      created_at:              row.get(8)?,
    })
  }

  pub fn into_record(self) -> Result<AnalyzedRecord> {
    Ok(AnalyzedRecord {
      id:         self.id,
      value:      self.value,
      properties: Properties {
        length:                  decode_count("length", self.length)?,
        is_palindrome:           self.is_palindrome,
        unique_characters:       decode_count(
          "unique_characters",
          self.unique_characters,
        )?,
        word_count:              decode_count("word_count", self.word_count)?,
        sha256_hash:             self.sha256_hash,
        character_frequency_map: decode_frequencies(
          &self.character_frequency_map,
        )?,
      },
      created_at: decode_dt(&self.created_at)?,
    })
  }
}
