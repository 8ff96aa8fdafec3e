//! JSON REST API for Sift.
//!
//! Exposes an axum [`Router`] backed by any [`sift_core::store::StringStore`].
//! TLS, tracing layers, and listener setup are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = sift_api::api_router(Arc::new(store));
//! ```

pub mod error;
pub mod strings;

use std::sync::Arc;

use axum::{Router, routing::get};
use sift_core::store::StringStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: StringStore + 'static,
{
  Router::new()
    .route("/strings", get(strings::list::<S>).post(strings::create::<S>))
    .route(
      "/strings/filter-by-natural-language",
      get(strings::natural_language::<S>),
    )
    .route(
      "/strings/{*value}",
      get(strings::get_one::<S>).delete(strings::delete_one::<S>),
    )
    .with_state(store)
}

#[cfg(test)]
mod tests;
