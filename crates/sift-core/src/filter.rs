//! The filter vocabulary shared by structured and natural-language queries.
//!
//! A [`FilterSet`] is a conjunction of optional predicates. Unset fields do
//! not constrain the result and are omitted when the set is echoed back to a
//! caller.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, record::AnalyzedRecord};

// ─── FilterSet ───────────────────────────────────────────────────────────────

/// Normalised filter criteria. All present predicates must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSet {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub is_palindrome:      Option<bool>,
  /// Inclusive lower bound on `length`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_length:         Option<i64>,
  /// Inclusive upper bound on `length`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_length:         Option<i64>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub word_count:         Option<i64>,
  /// Case-insensitive substring test against `value`.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub contains_character: Option<char>,
}

impl FilterSet {
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// Whether `record` satisfies every predicate in the set.
  pub fn matches(&self, record: &AnalyzedRecord) -> bool {
    let p = &record.properties;
    let length = p.length as i64;

    self.is_palindrome.is_none_or(|want| p.is_palindrome == want)
      && self.min_length.is_none_or(|min| length >= min)
      && self.max_length.is_none_or(|max| length <= max)
      && self.word_count.is_none_or(|wc| p.word_count as i64 == wc)
      && self
        .contains_character
        .is_none_or(|c| contains_ignore_case(&record.value, c))
  }

  /// Validate raw structured query parameters into a filter set.
  ///
  /// Each parameter is checked independently; the first malformed one is
  /// reported. Absent parameters stay unset.
  pub fn from_params(params: &FilterParams) -> Result<Self> {
    Ok(Self {
      is_palindrome:      params
        .is_palindrome
        .as_deref()
        .map(parse_bool)
        .transpose()?,
      min_length:         params
        .min_length
        .as_deref()
        .map(|s| parse_int("min_length", s))
        .transpose()?,
      max_length:         params
        .max_length
        .as_deref()
        .map(|s| parse_int("max_length", s))
        .transpose()?,
      word_count:         params
        .word_count
        .as_deref()
        .map(|s| parse_int("word_count", s))
        .transpose()?,
      contains_character: params
        .contains_character
        .as_deref()
        .map(parse_char)
        .transpose()?,
    })
  }
}

/// Case-insensitive containment using full Unicode lowercase folding.
pub fn contains_ignore_case(haystack: &str, needle: char) -> bool {
  let needle: String = needle.to_lowercase().collect();
  haystack.to_lowercase().contains(&needle)
}

// ─── Structured parameters ───────────────────────────────────────────────────

/// Raw structured query parameters, exactly as received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterParams {
  pub is_palindrome:      Option<String>,
  pub min_length:         Option<String>,
  pub max_length:         Option<String>,
  pub word_count:         Option<String>,
  pub contains_character: Option<String>,
}

fn parse_bool(raw: &str) -> Result<bool> {
  match raw.to_ascii_lowercase().as_str() {
    "true" => Ok(true),
    "false" => Ok(false),
    _ => Err(Error::InvalidParameter {
      name:   "is_palindrome",
      reason: "use 'true' or 'false'".into(),
    }),
  }
}

fn parse_int(name: &'static str, raw: &str) -> Result<i64> {
  raw.trim().parse().map_err(|_| Error::InvalidParameter {
    name,
    reason: "must be an integer".into(),
  })
}

fn parse_char(raw: &str) -> Result<char> {
  let mut chars = raw.chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) => Ok(c),
    _ => Err(Error::InvalidParameter {
      name:   "contains_character",
      reason: "must be a single character".into(),
    }),
  }
}
