//! Analyzed records — the sole persisted entity of the Sift store.
//!
//! A record is derived entirely from its raw value: the content identifier is
//! the SHA-256 digest of the value, and every property is computed once by
//! [`analyze`]. Records are never updated after insertion.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ─── Properties ──────────────────────────────────────────────────────────────

/// The derived properties of a string value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
  /// Number of Unicode scalar values.
  pub length:                  usize,
  /// Whether the lowercased value reads the same in both directions.
  pub is_palindrome:           bool,
  /// Number of distinct characters; case-sensitive.
  pub unique_characters:       usize,
  pub word_count:              usize,
  /// Always equal to the owning record's `id`.
  pub sha256_hash:             String,
  pub character_frequency_map: BTreeMap<char, usize>,
}

// ─── AnalyzedRecord ──────────────────────────────────────────────────────────

/// A stored string together with its derived properties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzedRecord {
  /// Lowercase hex SHA-256 of `value`; primary key.
  pub id:         String,
  pub value:      String,
  pub properties: Properties,
  /// Store-assigned timestamp; never changes after creation.
  pub created_at: DateTime<Utc>,
}

// ─── NewRecord ───────────────────────────────────────────────────────────────

/// Output of [`analyze`] and input to
/// [`crate::store::StringStore::insert`].
///
/// Fields are private so that `id` can only ever be derived from `value`.
/// `created_at` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
  id:         String,
  value:      String,
  properties: Properties,
}

impl NewRecord {
  pub fn id(&self) -> &str { &self.id }

  pub fn value(&self) -> &str { &self.value }

  pub fn properties(&self) -> &Properties { &self.properties }

  /// Stamp the record with its creation time.
  pub fn into_record(self, created_at: DateTime<Utc>) -> AnalyzedRecord {
    AnalyzedRecord {
      id: self.id,
      value: self.value,
      properties: self.properties,
      created_at,
    }
  }
}

// ─── Analyzer ────────────────────────────────────────────────────────────────

/// Hex-encoded SHA-256 digest of the UTF-8 bytes of `value`.
pub fn content_id(value: &str) -> String {
  hex::encode(Sha256::digest(value.as_bytes()))
}

/// Analyze `raw` and compute every derived property.
///
/// Deterministic and side-effect free. Only case is folded for the
/// palindrome check; whitespace and punctuation are significant.
pub fn analyze(raw: &str) -> NewRecord {
  let id = content_id(raw);

  let mut character_frequency_map = BTreeMap::new();
  let mut length = 0;
  for c in raw.chars() {
    *character_frequency_map.entry(c).or_insert(0) += 1;
    length += 1;
  }

  let properties = Properties {
    length,
    is_palindrome: is_palindrome(raw),
    unique_characters: character_frequency_map.len(),
    word_count: raw.split_whitespace().count(),
    sha256_hash: id.clone(),
    character_frequency_map,
  };

  NewRecord {
    id,
    value: raw.to_owned(),
    properties,
  }
}

fn is_palindrome(raw: &str) -> bool {
  let folded: Vec<char> = raw.to_lowercase().chars().collect();
  folded.iter().eq(folded.iter().rev())
}
