//! JSON REST API for the candidate roster.
//!
//! Exposes an axum [`Router`] backed by any
//! [`roster_core::store::CandidateStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! axum::serve(listener, roster_api::api_router(store.clone())).await?;
//! ```

pub mod candidates;
pub mod error;
pub mod health;

use std::sync::Arc;

use axum::{
  Router,
  routing::get,
};
use roster_core::store::CandidateStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CandidateStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/health", get(health::check))
    .route(
      "/candidates",
      get(candidates::list::<S>).post(candidates::create::<S>),
    )
    .route("/candidates/{id}", get(candidates::get_one::<S>))
    .with_state(store)
}

#[cfg(test)]
mod tests;
