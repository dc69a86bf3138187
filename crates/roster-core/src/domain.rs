//! Persisted domain types and their insert shapes.
//!
//! Row identifiers are assigned by the store on insert and never change.
//! Wire names are camelCase to match the JSON surface.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned numeric identifier of a candidate row.
pub type CandidateId = i64;

// ─── Candidate ───────────────────────────────────────────────────────────────

/// A person under recruitment consideration.
///
/// Owns zero-or-more [`Education`] and [`WorkExperience`] rows and at most one
/// [`Resume`]. Never mutated by the intake workflow once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
  pub id:         CandidateId,
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub phone:      Option<String>,
  pub address:    Option<String>,
}

/// Candidate fields for insertion; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCandidate {
  pub first_name: String,
  pub last_name:  String,
  pub email:      String,
  pub phone:      Option<String>,
  pub address:    Option<String>,
}

// ─── Children ────────────────────────────────────────────────────────────────

/// One education record, owned by exactly one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
  pub id:           i64,
  pub candidate_id: CandidateId,
  pub institution:  String,
  pub title:        Option<String>,
  pub start_date:   NaiveDate,
  /// `None` means the education is open-ended.
  pub end_date:     Option<NaiveDate>,
}

/// Education fields for insertion under an existing candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEducation {
  pub institution: String,
  pub title:       Option<String>,
  pub start_date:  NaiveDate,
  pub end_date:    Option<NaiveDate>,
}

/// One work-experience record, owned by exactly one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
  pub id:           i64,
  pub candidate_id: CandidateId,
  pub company:      String,
  pub position:     String,
  pub description:  Option<String>,
  pub start_date:   NaiveDate,
  /// `None` means "current position".
  pub end_date:     Option<NaiveDate>,
}

/// Work-experience fields for insertion under an existing candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkExperience {
  pub company:     String,
  pub position:    String,
  pub description: Option<String>,
  pub start_date:  NaiveDate,
  pub end_date:    Option<NaiveDate>,
}

/// Résumé metadata. The file bytes live with an external upload collaborator;
/// only the storage-relative reference is persisted here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resume {
  pub id:           i64,
  pub candidate_id: CandidateId,
  pub file_path:    String,
  pub file_type:    String,
  /// Server-assigned at creation.
  pub upload_date:  DateTime<Utc>,
}

/// Résumé reference for insertion under an existing candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewResume {
  pub file_path: String,
  pub file_type: String,
}

// ─── Read model ──────────────────────────────────────────────────────────────

/// A candidate together with all of its child records — the detail view
/// returned by `GET /candidates/{id}` and by a successful intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProfile {
  #[serde(flatten)]
  pub candidate:        Candidate,
  pub educations:       Vec<Education>,
  pub work_experiences: Vec<WorkExperience>,
  pub resume:           Option<Resume>,
}
