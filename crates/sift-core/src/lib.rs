//! Core types and trait definitions for the Sift string store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! It holds the string analyzer, the filter vocabulary shared by both query
//! modes, the natural-language interpreter, and the [`store::StringStore`]
//! abstraction that backends implement.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod filter;
pub mod interpret;
pub mod record;
pub mod store;

pub use error::{Error, Result};
