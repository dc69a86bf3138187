//! One-pass validation of a [`CandidateSubmission`].
//!
//! All violated fields are collected into a single [`FieldErrors`] map so a
//! client can render every problem at once; nothing is written anywhere on
//! failure. On success the submission is normalized into the insert shapes
//! consumed by the store.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{
  domain::{NewCandidate, NewEducation, NewResume, NewWorkExperience},
  submission::CandidateSubmission,
};

// ─── Field errors ────────────────────────────────────────────────────────────

/// Field name → human-readable message, for every violated field.
///
/// Nested entries use indexed keys, e.g. `educations[0].institution`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors {
  errors: BTreeMap<String, String>,
}

impl FieldErrors {
  pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
    self.errors.insert(field.into(), message.into());
  }

  pub fn get(&self, field: &str) -> Option<&str> {
    self.errors.get(field).map(String::as_str)
  }

  pub fn remove(&mut self, field: &str) {
    self.errors.remove(field);
  }

  pub fn is_empty(&self) -> bool { self.errors.is_empty() }

  pub fn len(&self) -> usize { self.errors.len() }

  pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
    self
      .errors
      .iter()
      .map(|(k, v)| (k.as_str(), v.as_str()))
  }
}

impl std::fmt::Display for FieldErrors {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let mut first = true;
    for (field, message) in &self.errors {
      if !first {
        write!(f, "; ")?;
      }
      write!(f, "{field}: {message}")?;
      first = false;
    }
    Ok(())
  }
}

// ─── Options ─────────────────────────────────────────────────────────────────

/// Validation policy knobs.
///
/// Phone is never required at the workflow/storage layer; presentation layers
/// may opt into requiring it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
  pub require_phone: bool,
}

// ─── Normalized output ───────────────────────────────────────────────────────

/// A submission that passed validation, normalized and ready for persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
  pub candidate:        NewCandidate,
  pub educations:       Vec<NewEducation>,
  pub work_experiences: Vec<NewWorkExperience>,
  pub cv:               Option<NewResume>,
}

// ─── Validation ──────────────────────────────────────────────────────────────

/// Validate `input` in one pass.
///
/// Returns the normalized submission, or the full map of violated fields.
pub fn validate_submission(
  input: &CandidateSubmission,
  options: ValidationOptions,
) -> Result<ValidSubmission, FieldErrors> {
  let mut errors = FieldErrors::default();

  let first_name = required(&mut errors, "firstName", &input.first_name);
  let last_name = required(&mut errors, "lastName", &input.last_name);

  let email = match trimmed(&input.email) {
    None => {
      errors.push("email", "email required");
      None
    }
    Some(e) if !is_valid_email(&e) => {
      errors.push("email", "invalid email format");
      None
    }
    Some(e) => Some(e),
  };

  let phone = trimmed(&input.phone);
  if options.require_phone && phone.is_none() {
    errors.push("phone", "phone required");
  }
  let address = trimmed(&input.address);

  let mut educations = Vec::with_capacity(input.educations.len());
  for (i, entry) in input.educations.iter().enumerate() {
    let institution =
      required(&mut errors, format!("educations[{i}].institution"), &entry.institution);
    if entry.start_date.is_none() {
      errors.push(format!("educations[{i}].startDate"), "startDate required");
    }
    if let (Some(institution), Some(start_date)) = (institution, entry.start_date) {
      educations.push(NewEducation {
        institution,
        title: trimmed(&entry.title),
        start_date,
        end_date: entry.end_date,
      });
    }
  }

  let mut work_experiences = Vec::with_capacity(input.work_experiences.len());
  for (i, entry) in input.work_experiences.iter().enumerate() {
    let company =
      required(&mut errors, format!("workExperiences[{i}].company"), &entry.company);
    let position =
      required(&mut errors, format!("workExperiences[{i}].position"), &entry.position);
    if entry.start_date.is_none() {
      errors.push(format!("workExperiences[{i}].startDate"), "startDate required");
    }
    if let (Some(company), Some(position), Some(start_date)) =
      (company, position, entry.start_date)
    {
      work_experiences.push(NewWorkExperience {
        company,
        position,
        description: trimmed(&entry.description),
        start_date,
        end_date: entry.end_date,
      });
    }
  }

  let cv = match &input.cv {
    None => None,
    Some(upload) => {
      let file_path = required(&mut errors, "cv.filePath", &upload.file_path);
      let file_type = required(&mut errors, "cv.fileType", &upload.file_type);
      match (file_path, file_type) {
        (Some(file_path), Some(file_type)) => Some(NewResume { file_path, file_type }),
        _ => None,
      }
    }
  };

  if !errors.is_empty() {
    return Err(errors);
  }

  Ok(ValidSubmission {
    candidate: NewCandidate {
      // Required fields are always Some when `errors` is empty.
      first_name: first_name.unwrap_or_default(),
      last_name: last_name.unwrap_or_default(),
      email: email.unwrap_or_default(),
      phone,
      address,
    },
    educations,
    work_experiences,
    cv,
  })
}

/// Trimmed value of an optional field; blank collapses to `None`.
fn trimmed(value: &Option<String>) -> Option<String> {
  value
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(str::to_owned)
}

/// Require a non-blank value, recording `<field> required` otherwise.
fn required(
  errors: &mut FieldErrors,
  field: impl Into<String>,
  value: &Option<String>,
) -> Option<String> {
  let field = field.into();
  match trimmed(value) {
    Some(v) => Some(v),
    None => {
      let name = field.rsplit('.').next().unwrap_or(&field).to_owned();
      errors.push(field, format!("{name} required"));
      None
    }
  }
}

/// Shape check equivalent to `^[^\s@]+@[^\s@]+\.[^\s@]+$`.
///
/// Intentionally permissive; full RFC validation is out of scope.
fn is_valid_email(s: &str) -> bool {
  let Some((local, rest)) = s.split_once('@') else {
    return false;
  };
  let Some((domain, tld)) = rest.rsplit_once('.') else {
    return false;
  };
  let part_ok =
    |p: &str| !p.is_empty() && !p.contains('@') && !p.chars().any(char::is_whitespace);
  part_ok(local) && part_ok(domain) && part_ok(tld)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::submission::{EducationEntry, ResumeUpload, WorkExperienceEntry};

  fn minimal() -> CandidateSubmission {
    CandidateSubmission {
      first_name: Some("Albert".into()),
      last_name: Some("Saelices".into()),
      email: Some("albert.saelices@gmail.com".into()),
      ..Default::default()
    }
  }

  fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
  }

  #[test]
  fn minimal_submission_passes() {
    let valid = validate_submission(&minimal(), ValidationOptions::default()).unwrap();
    assert_eq!(valid.candidate.first_name, "Albert");
    assert_eq!(valid.candidate.email, "albert.saelices@gmail.com");
    assert!(valid.candidate.phone.is_none());
    assert!(valid.educations.is_empty());
    assert!(valid.cv.is_none());
  }

  #[test]
  fn missing_required_fields_all_reported() {
    let errors =
      validate_submission(&CandidateSubmission::default(), ValidationOptions::default())
        .unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get("firstName"), Some("firstName required"));
    assert_eq!(errors.get("lastName"), Some("lastName required"));
    assert_eq!(errors.get("email"), Some("email required"));
  }

  #[test]
  fn blank_after_trimming_is_missing() {
    let mut input = minimal();
    input.first_name = Some("   ".into());
    let errors = validate_submission(&input, ValidationOptions::default()).unwrap_err();
    assert_eq!(errors.get("firstName"), Some("firstName required"));
  }

  #[test]
  fn malformed_emails_rejected() {
    for bad in ["no-at-sign.com", "a@b", "a@b.", "@b.com", "a b@c.com", "a@b c.com"] {
      let mut input = minimal();
      input.email = Some(bad.into());
      let errors = validate_submission(&input, ValidationOptions::default()).unwrap_err();
      assert_eq!(errors.get("email"), Some("invalid email format"), "email: {bad}");
    }
  }

  #[test]
  fn plausible_emails_accepted() {
    for good in ["a@b.c", "first.last@sub.domain.org", "x+tag@example.co.uk"] {
      let mut input = minimal();
      input.email = Some(good.into());
      assert!(
        validate_submission(&input, ValidationOptions::default()).is_ok(),
        "email: {good}"
      );
    }
  }

  #[test]
  fn phone_optional_by_default_required_on_request() {
    let input = minimal();
    assert!(validate_submission(&input, ValidationOptions::default()).is_ok());

    let errors =
      validate_submission(&input, ValidationOptions { require_phone: true }).unwrap_err();
    assert_eq!(errors.get("phone"), Some("phone required"));
  }

  #[test]
  fn education_entries_need_institution_and_start_date() {
    let mut input = minimal();
    input.educations = vec![
      EducationEntry {
        institution: Some("UC3M".into()),
        title: Some("Computer Science".into()),
        start_date: Some(date("2006-12-31")),
        end_date: Some(date("2010-12-26")),
      },
      EducationEntry::default(),
    ];
    let errors = validate_submission(&input, ValidationOptions::default()).unwrap_err();
    assert!(errors.get("educations[0].institution").is_none());
    assert_eq!(errors.get("educations[1].institution"), Some("institution required"));
    assert_eq!(errors.get("educations[1].startDate"), Some("startDate required"));
  }

  #[test]
  fn work_entries_need_company_position_and_start_date() {
    let mut input = minimal();
    input.work_experiences = vec![WorkExperienceEntry {
      description: Some("".into()),
      ..Default::default()
    }];
    let errors = validate_submission(&input, ValidationOptions::default()).unwrap_err();
    assert_eq!(errors.get("workExperiences[0].company"), Some("company required"));
    assert_eq!(errors.get("workExperiences[0].position"), Some("position required"));
    assert_eq!(errors.get("workExperiences[0].startDate"), Some("startDate required"));
  }

  #[test]
  fn cv_needs_both_reference_fields() {
    let mut input = minimal();
    input.cv = Some(ResumeUpload {
      file_path: Some("uploads/cv.pdf".into()),
      file_type: None,
    });
    let errors = validate_submission(&input, ValidationOptions::default()).unwrap_err();
    assert_eq!(errors.get("cv.fileType"), Some("fileType required"));
    assert!(errors.get("cv.filePath").is_none());
  }

  #[test]
  fn well_formed_entries_pass_through_in_order() {
    let mut input = minimal();
    input.work_experiences = vec![
      WorkExperienceEntry {
        company: Some("Coca Cola".into()),
        position: Some("SWE".into()),
        description: Some("".into()),
        start_date: Some(date("2011-01-13")),
        end_date: Some(date("2013-01-17")),
      },
      WorkExperienceEntry {
        company: Some("Pepsi".into()),
        position: Some("Lead".into()),
        description: Some("Platform team".into()),
        start_date: Some(date("2013-02-01")),
        end_date: None,
      },
    ];
    let valid = validate_submission(&input, ValidationOptions::default()).unwrap();
    assert_eq!(valid.work_experiences.len(), 2);
    assert_eq!(valid.work_experiences[0].company, "Coca Cola");
    // Blank description collapses to None.
    assert!(valid.work_experiences[0].description.is_none());
    assert_eq!(valid.work_experiences[1].company, "Pepsi");
    assert!(valid.work_experiences[1].end_date.is_none());
  }
}
