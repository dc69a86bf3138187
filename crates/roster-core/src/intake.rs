//! The candidate intake workflow — validated submission to persisted rows.
//!
//! Creation order is candidate row first, then each education and
//! work-experience entry in submission order, then the résumé reference.
//! Child writes are issued sequentially; there is no compensating rollback if
//! a later write fails, so a storage failure mid-intake can leave a candidate
//! with a partial set of children. The partial-failure risk is accepted and
//! surfaced as an [`IntakeError::Store`].

use crate::{
  domain::{Candidate, CandidateId, CandidateProfile},
  error::{FetchError, IntakeError},
  store::CandidateStore,
  submission::CandidateSubmission,
  validate::{self, ValidationOptions},
};

/// Validate `submission` and persist the candidate with all child records.
///
/// On validation failure, zero writes occur. A unique-constraint violation on
/// the email column is reported as [`IntakeError::DuplicateEmail`].
pub async fn create_candidate<S: CandidateStore>(
  store: &S,
  submission: &CandidateSubmission,
) -> Result<CandidateProfile, IntakeError<S::Error>> {
  let valid = validate::validate_submission(submission, ValidationOptions::default())
    .map_err(IntakeError::Invalid)?;

  let email = valid.candidate.email.clone();
  let candidate = store.create_candidate(valid.candidate).await.map_err(|e| {
    if S::is_duplicate_email(&e) {
      IntakeError::DuplicateEmail(email)
    } else {
      IntakeError::Store(e)
    }
  })?;

  let mut educations = Vec::with_capacity(valid.educations.len());
  for entry in valid.educations {
    let row = store
      .create_education(candidate.id, entry)
      .await
      .map_err(IntakeError::Store)?;
    educations.push(row);
  }

  let mut work_experiences = Vec::with_capacity(valid.work_experiences.len());
  for entry in valid.work_experiences {
    let row = store
      .create_work_experience(candidate.id, entry)
      .await
      .map_err(IntakeError::Store)?;
    work_experiences.push(row);
  }

  let resume = match valid.cv {
    Some(upload) => Some(
      store
        .create_resume(candidate.id, upload)
        .await
        .map_err(IntakeError::Store)?,
    ),
    None => None,
  };

  Ok(CandidateProfile {
    candidate,
    educations,
    work_experiences,
    resume,
  })
}

/// Retrieve a candidate with children, distinguishing absence from failure.
pub async fn fetch_candidate<S: CandidateStore>(
  store: &S,
  id: CandidateId,
) -> Result<CandidateProfile, FetchError<S::Error>> {
  store
    .get_candidate(id)
    .await
    .map_err(FetchError::Store)?
    .ok_or(FetchError::NotFound(id))
}

/// List all candidate rows, without children.
pub async fn list_candidates<S: CandidateStore>(
  store: &S,
) -> Result<Vec<Candidate>, S::Error> {
  store.list_candidates().await
}

// ─── Tests ───────────────────────────────────────────────────────────────────
