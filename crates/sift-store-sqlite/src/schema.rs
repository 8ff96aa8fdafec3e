//! SQL schema for the Sift SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- Rows are never updated; only inserted and deleted.
CREATE TABLE IF NOT EXISTS strings (
    id                      TEXT PRIMARY KEY,      -- sha256 hex of value
    value                   TEXT NOT NULL UNIQUE,
    length                  INTEGER NOT NULL,
    is_palindrome           INTEGER NOT NULL,      -- 0 | 1
    unique_characters       INTEGER NOT NULL,
    word_count              INTEGER NOT NULL,
    sha256_hash             TEXT NOT NULL UNIQUE,
    character_frequency_map TEXT NOT NULL,         -- JSON object
    created_at              TEXT NOT NULL          -- RFC 3339 UTC, fixed width
);

CREATE INDEX IF NOT EXISTS strings_created_idx ON strings(created_at);

PRAGMA user_version = 1;
";
