//! The `CandidateStore` trait — the narrow storage gateway.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! Higher layers (`roster-api`, the intake workflow) depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::domain::{
  Candidate, CandidateId, CandidateProfile, Education, NewCandidate, NewEducation,
  NewResume, NewWorkExperience, Resume, WorkExperience,
};

/// Abstraction over a candidate roster storage backend.
///
/// From this crate's point of view the store is append-only: rows are created
/// and read, never updated or deleted. Ids and the résumé upload timestamp are
/// assigned by the store.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CandidateStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Whether `err` is a unique-constraint violation on the candidate email
  /// column. Backends without such a constraint keep the default.
  fn is_duplicate_email(err: &Self::Error) -> bool {
    let _ = err;
    false
  }

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new candidate row and return it with its assigned id.
  fn create_candidate(
    &self,
    fields: NewCandidate,
  ) -> impl Future<Output = Result<Candidate, Self::Error>> + Send + '_;

  /// Persist one education row under an existing candidate.
  fn create_education(
    &self,
    candidate_id: CandidateId,
    fields: NewEducation,
  ) -> impl Future<Output = Result<Education, Self::Error>> + Send + '_;

  /// Persist one work-experience row under an existing candidate.
  fn create_work_experience(
    &self,
    candidate_id: CandidateId,
    fields: NewWorkExperience,
  ) -> impl Future<Output = Result<WorkExperience, Self::Error>> + Send + '_;

  /// Persist the résumé reference for an existing candidate. The upload
  /// timestamp is set by the store.
  fn create_resume(
    &self,
    candidate_id: CandidateId,
    fields: NewResume,
  ) -> impl Future<Output = Result<Resume, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a candidate row by id, without children. `None` if not found.
  fn find_candidate(
    &self,
    id: CandidateId,
  ) -> impl Future<Output = Result<Option<Candidate>, Self::Error>> + Send + '_;

  /// Retrieve a candidate with all child records. `None` if not found.
  fn get_candidate(
    &self,
    id: CandidateId,
  ) -> impl Future<Output = Result<Option<CandidateProfile>, Self::Error>> + Send + '_;

  /// List all candidate rows, without children. Empty when none exist.
  fn list_candidates(
    &self,
  ) -> impl Future<Output = Result<Vec<Candidate>, Self::Error>> + Send + '_;
}
