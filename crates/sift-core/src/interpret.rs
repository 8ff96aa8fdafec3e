//! Heuristic natural-language → [`FilterSet`] translation.
//!
//! The interpreter is an ordered table of [`Rule`]s evaluated against the
//! trimmed, lowercased query text. Each rule may emit a single [`Clause`];
//! clauses are applied in table order, so a later rule overwrites a field set
//! by an earlier one (e.g. "at least" after "longer than").

use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::{Error, Result, filter::FilterSet};

// ─── Clauses ─────────────────────────────────────────────────────────────────

/// A single effect produced by a matching rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clause {
  Palindrome,
  WordCount(i64),
  MinLength(i64),
  MaxLength(i64),
  Contains(char),
}

impl Clause {
  pub fn apply(self, filters: &mut FilterSet) {
    match self {
      Clause::Palindrome => filters.is_palindrome = Some(true),
      Clause::WordCount(n) => filters.word_count = Some(n),
      Clause::MinLength(n) => filters.min_length = Some(n),
      Clause::MaxLength(n) => filters.max_length = Some(n),
      Clause::Contains(c) => filters.contains_character = Some(c),
    }
  }
}

// ─── Rules ───────────────────────────────────────────────────────────────────

/// One heuristic. `apply` sees the normalised text and the filters built so
/// far, and returns the clause to apply, if any.
pub struct Rule {
  pub name:  &'static str,
  pub apply: fn(&str, &FilterSet) -> Option<Clause>,
}

/// The rule table, in evaluation order.
pub const RULES: &[Rule] = &[
  Rule { name: "palindrome",    apply: palindrome },
  Rule { name: "word_count",    apply: word_count },
  Rule { name: "longer_than",   apply: longer_than },
  Rule { name: "shorter_than",  apply: shorter_than },
  Rule { name: "at_least",      apply: at_least },
  Rule { name: "at_most",       apply: at_most },
  Rule { name: "letter",        apply: letter },
  Rule { name: "ordinal_vowel", apply: ordinal_vowel },
];

/// Look up a rule by name.
pub fn rule(name: &str) -> Option<&'static Rule> {
  RULES.iter().find(|r| r.name == name)
}

fn palindrome(text: &str, _: &FilterSet) -> Option<Clause> {
  (text.contains("palindrome") || text.contains("palindromic"))
    .then_some(Clause::Palindrome)
}

fn word_count(text: &str, _: &FilterSet) -> Option<Clause> {
  const NAMED: &[(&[&str], i64)] = &[
    (&["single word", "one word"], 1),
    (&["two word", "2 word"], 2),
    (&["three word", "3 word"], 3),
  ];

  NAMED
    .iter()
    .find(|(phrases, _)| phrases.iter().any(|p| text.contains(p)))
    .map(|(_, n)| Clause::WordCount(*n))
    .or_else(|| capture_number(words_pattern(), text).map(Clause::WordCount))
}

fn longer_than(text: &str, _: &FilterSet) -> Option<Clause> {
  capture_number(longer_pattern(), text)
    .map(|n| Clause::MinLength(n.saturating_add(1)))
}

fn shorter_than(text: &str, _: &FilterSet) -> Option<Clause> {
  capture_number(shorter_pattern(), text)
    .map(|n| Clause::MaxLength(n.saturating_sub(1)))
}

fn at_least(text: &str, _: &FilterSet) -> Option<Clause> {
  capture_number(at_least_pattern(), text).map(Clause::MinLength)
}

fn at_most(text: &str, _: &FilterSet) -> Option<Clause> {
  capture_number(at_most_pattern(), text).map(Clause::MaxLength)
}

fn letter(text: &str, _: &FilterSet) -> Option<Clause> {
  letter_pattern()
    .captures(text)
    .and_then(|caps| caps.get(1))
    .and_then(|m| m.as_str().chars().next())
    .map(Clause::Contains)
}

fn ordinal_vowel(text: &str, filters: &FilterSet) -> Option<Clause> {
  const ORDINALS: &[(&str, char)] = &[
    ("first vowel", 'a'),
    ("second vowel", 'e'),
    ("third vowel", 'i'),
    ("fourth vowel", 'o'),
    ("fifth vowel", 'u'),
  ];

  // An explicit letter reference takes precedence.
  if filters.contains_character.is_some() {
    return None;
  }
  ORDINALS
    .iter()
    .find(|(phrase, _)| text.contains(phrase))
    .map(|(_, c)| Clause::Contains(*c))
}

// ─── Patterns ────────────────────────────────────────────────────────────────

fn cached(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
  cell.get_or_init(|| {
    Regex::new(pattern).expect("static interpreter pattern is valid")
  })
}

fn words_pattern() -> &'static Regex {
  static CELL: OnceLock<Regex> = OnceLock::new();
  cached(&CELL, r"(\d+)\s*words?")
}

fn longer_pattern() -> &'static Regex {
  static CELL: OnceLock<Regex> = OnceLock::new();
  cached(&CELL, r"(?:longer|more)\s+than\s+(\d+)\s*(?:character|char)")
}

fn shorter_pattern() -> &'static Regex {
  static CELL: OnceLock<Regex> = OnceLock::new();
  cached(&CELL, r"(?:shorter|less)\s+than\s+(\d+)\s*(?:character|char)")
}

fn at_least_pattern() -> &'static Regex {
  static CELL: OnceLock<Regex> = OnceLock::new();
  cached(&CELL, r"at\s+least\s+(\d+)\s*(?:character|char)")
}

fn at_most_pattern() -> &'static Regex {
  static CELL: OnceLock<Regex> = OnceLock::new();
  cached(&CELL, r"at\s+most\s+(\d+)\s*(?:character|char)")
}

fn letter_pattern() -> &'static Regex {
  static CELL: OnceLock<Regex> = OnceLock::new();
  cached(
    &CELL,
    r"(?:containing|with|contain)\s+(?:the\s+)?(?:letter|character)\s+([a-z])",
  )
}

/// First capture group of `re` in `text`, parsed as an integer. Numbers that
/// overflow `i64` are treated as no match.
fn capture_number(re: &Regex, text: &str) -> Option<i64> {
  re.captures(text)?.get(1)?.as_str().parse().ok()
}

// ─── Interpretation ──────────────────────────────────────────────────────────

/// The result of interpreting a query: the caller's text and what it became.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Interpretation {
  pub original:       String,
  pub parsed_filters: FilterSet,
}

/// Translate a free-text query into a [`FilterSet`].
///
/// Returns [`Error::UnparseableQuery`] when no rule matches.
pub fn interpret(text: &str) -> Result<Interpretation> {
  let normalised = text.trim().to_lowercase();

  let mut filters = FilterSet::default();
  for rule in RULES {
    if let Some(clause) = (rule.apply)(&normalised, &filters) {
      clause.apply(&mut filters);
    }
  }

  if filters.is_empty() {
    return Err(Error::UnparseableQuery(text.to_owned()));
  }

  Ok(Interpretation {
    original:       text.to_owned(),
    parsed_filters: filters,
  })
}
