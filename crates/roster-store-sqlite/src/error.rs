//! Error type for `roster-store-sqlite`.

use roster_core::domain::CandidateId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Unique-constraint violation on `candidates.email`.
  #[error("email already registered: {0}")]
  DuplicateEmail(String),

  /// A child insert referenced a candidate row that does not exist.
  #[error("candidate not found: {0}")]
  CandidateNotFound(CandidateId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
