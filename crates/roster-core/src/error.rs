//! Error types for the intake and retrieval workflows.

use thiserror::Error;

use crate::{domain::CandidateId, validate::FieldErrors};

/// Failure modes of [`crate::intake::create_candidate`].
///
/// `Invalid` is produced before any write is attempted; the other variants
/// come from the storage gateway.
#[derive(Debug, Error)]
pub enum IntakeError<E> {
  #[error("validation failed: {0}")]
  Invalid(FieldErrors),

  #[error("email already registered: {0}")]
  DuplicateEmail(String),

  #[error("storage error: {0}")]
  Store(#[source] E),
}

/// Failure modes of [`crate::intake::fetch_candidate`].
#[derive(Debug, Error)]
pub enum FetchError<E> {
  #[error("candidate not found: {0}")]
  NotFound(CandidateId),

  #[error("storage error: {0}")]
  Store(#[source] E),
}
