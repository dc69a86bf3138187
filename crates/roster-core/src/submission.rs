//! The raw candidate submission — the request shape accepted at the boundary.
//!
//! Every field is optional here; [`crate::validate`] decides which absences
//! are acceptable and reports all violations at once. Browser clients send
//! empty strings for blank date pickers, so optional dates tolerate `""`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A candidate creation request, prior to validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CandidateSubmission {
  pub first_name:       Option<String>,
  pub last_name:        Option<String>,
  pub email:            Option<String>,
  pub phone:            Option<String>,
  pub address:          Option<String>,
  pub educations:       Vec<EducationEntry>,
  pub work_experiences: Vec<WorkExperienceEntry>,
  pub cv:               Option<ResumeUpload>,
}

/// One education entry of a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EducationEntry {
  pub institution: Option<String>,
  pub title:       Option<String>,
  #[serde(deserialize_with = "lenient_date")]
  pub start_date:  Option<NaiveDate>,
  #[serde(deserialize_with = "lenient_date")]
  pub end_date:    Option<NaiveDate>,
}

/// One work-experience entry of a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkExperienceEntry {
  pub company:     Option<String>,
  pub position:    Option<String>,
  pub description: Option<String>,
  #[serde(deserialize_with = "lenient_date")]
  pub start_date:  Option<NaiveDate>,
  #[serde(deserialize_with = "lenient_date")]
  pub end_date:    Option<NaiveDate>,
}

/// The output shape of the file-upload collaborator.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeUpload {
  pub file_path: Option<String>,
  pub file_type: Option<String>,
}

/// Accepts `null`, `""`, or a `YYYY-MM-DD` string.
fn lenient_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Option::<String>::deserialize(deserializer)?;
  match raw.as_deref().map(str::trim) {
    None | Some("") => Ok(None),
    Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
      .map(Some)
      .map_err(serde::de::Error::custom),
  }
}
