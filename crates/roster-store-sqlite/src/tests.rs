//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::NaiveDate;
use roster_core::{
  domain::{NewCandidate, NewEducation, NewResume, NewWorkExperience},
  intake,
  store::CandidateStore,
  submission::{CandidateSubmission, EducationEntry, ResumeUpload, WorkExperienceEntry},
};

use crate::{Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(s: &str) -> NaiveDate {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn albert() -> NewCandidate {
  NewCandidate {
    first_name: "Albert".into(),
    last_name:  "Saelices".into(),
    email:      "albert.saelices@gmail.com".into(),
    phone:      Some("656874937".into()),
    address:    Some("Calle Sant Dalmir 2, 5ºB. Barcelona".into()),
  }
}

// ─── Candidates ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_find_candidate() {
  let s = store().await;

  let created = s.create_candidate(albert()).await.unwrap();
  assert!(created.id > 0);

  let fetched = s.find_candidate(created.id).await.unwrap().unwrap();
  assert_eq!(fetched, created);
}

#[tokio::test]
async fn find_missing_candidate_returns_none() {
  let s = store().await;
  assert!(s.find_candidate(999).await.unwrap().is_none());
}

#[tokio::test]
async fn list_on_empty_store_is_empty() {
  let s = store().await;
  assert!(s.list_candidates().await.unwrap().is_empty());
}

#[tokio::test]
async fn list_returns_rows_without_children() {
  let s = store().await;
  let first = s.create_candidate(albert()).await.unwrap();

  let mut other = albert();
  other.email = "someone.else@example.com".into();
  s.create_candidate(other).await.unwrap();

  let all = s.list_candidates().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].id, first.id);
}

#[tokio::test]
async fn duplicate_email_is_rejected_distinctly() {
  let s = store().await;
  s.create_candidate(albert()).await.unwrap();

  let err = s.create_candidate(albert()).await.unwrap_err();
  match err {
    Error::DuplicateEmail(email) => assert_eq!(email, "albert.saelices@gmail.com"),
    other => panic!("expected DuplicateEmail, got {other:?}"),
  }
  assert!(SqliteStore::is_duplicate_email(&Error::DuplicateEmail(String::new())));

  // The failed insert must not have produced a row.
  assert_eq!(s.list_candidates().await.unwrap().len(), 1);
}

// ─── Children ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn child_rows_reference_their_candidate() {
  let s = store().await;
  let candidate = s.create_candidate(albert()).await.unwrap();

  let education = s
    .create_education(candidate.id, NewEducation {
      institution: "UC3M".into(),
      title:       Some("Computer Science".into()),
      start_date:  date("2006-12-31"),
      end_date:    Some(date("2010-12-26")),
    })
    .await
    .unwrap();
  assert_eq!(education.candidate_id, candidate.id);

  let experience = s
    .create_work_experience(candidate.id, NewWorkExperience {
      company:     "Coca Cola".into(),
      position:    "SWE".into(),
      description: None,
      start_date:  date("2011-01-13"),
      end_date:    Some(date("2013-01-17")),
    })
    .await
    .unwrap();
  assert_eq!(experience.candidate_id, candidate.id);

  let resume = s
    .create_resume(candidate.id, NewResume {
      file_path: "uploads/1715760936750-cv.pdf".into(),
      file_type: "application/pdf".into(),
    })
    .await
    .unwrap();
  assert_eq!(resume.candidate_id, candidate.id);
}

#[tokio::test]
async fn child_insert_against_missing_candidate_fails() {
  let s = store().await;
  let err = s
    .create_education(12345, NewEducation {
      institution: "UC3M".into(),
      title:       None,
      start_date:  date("2006-12-31"),
      end_date:    None,
    })
    .await
    .unwrap_err();
  assert!(matches!(err, Error::CandidateNotFound(12345)));
}

#[tokio::test]
async fn open_ended_dates_roundtrip_as_none() {
  let s = store().await;
  let candidate = s.create_candidate(albert()).await.unwrap();

  s.create_work_experience(candidate.id, NewWorkExperience {
    company:     "Pepsi".into(),
    position:    "Lead".into(),
    description: Some("Platform team".into()),
    start_date:  date("2013-02-01"),
    end_date:    None,
  })
  .await
  .unwrap();

  let profile = s.get_candidate(candidate.id).await.unwrap().unwrap();
  assert_eq!(profile.work_experiences.len(), 1);
  assert!(profile.work_experiences[0].end_date.is_none());
  assert_eq!(profile.work_experiences[0].start_date, date("2013-02-01"));
}

#[tokio::test]
async fn resume_upload_date_is_store_assigned() {
  let s = store().await;
  let candidate = s.create_candidate(albert()).await.unwrap();

  let before = chrono::Utc::now();
  let resume = s
    .create_resume(candidate.id, NewResume {
      file_path: "uploads/cv.pdf".into(),
      file_type: "application/pdf".into(),
    })
    .await
    .unwrap();
  let after = chrono::Utc::now();

  assert!(resume.upload_date >= before && resume.upload_date <= after);
}

// ─── Profiles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_profile_returns_none() {
  let s = store().await;
  assert!(s.get_candidate(999).await.unwrap().is_none());
}

#[tokio::test]
async fn profile_children_come_back_in_insertion_order() {
  let s = store().await;
  let candidate = s.create_candidate(albert()).await.unwrap();

  for institution in ["UC3M", "MIT", "ETH"] {
    s.create_education(candidate.id, NewEducation {
      institution: institution.into(),
      title:       None,
      start_date:  date("2006-12-31"),
      end_date:    None,
    })
    .await
    .unwrap();
  }

  let profile = s.get_candidate(candidate.id).await.unwrap().unwrap();
  let institutions: Vec<_> = profile
    .educations
    .iter()
    .map(|e| e.institution.as_str())
    .collect();
  assert_eq!(institutions, ["UC3M", "MIT", "ETH"]);
}

// ─── Full intake through the real store ──────────────────────────────────────

#[tokio::test]
async fn intake_roundtrip_through_sqlite() {
  let s = store().await;

  let submission = CandidateSubmission {
    first_name: Some("Albert".into()),
    last_name: Some("Saelices".into()),
    email: Some("albert.saelices@gmail.com".into()),
    phone: Some("656874937".into()),
    address: None,
    educations: vec![EducationEntry {
      institution: Some("UC3M".into()),
      title: Some("Computer Science".into()),
      start_date: Some(date("2006-12-31")),
      end_date: Some(date("2010-12-26")),
    }],
    work_experiences: vec![WorkExperienceEntry {
      company: Some("Coca Cola".into()),
      position: Some("SWE".into()),
      description: None,
      start_date: Some(date("2011-01-13")),
      end_date: Some(date("2013-01-17")),
    }],
    cv: Some(ResumeUpload {
      file_path: Some("uploads/1715760936750-cv.pdf".into()),
      file_type: Some("application/pdf".into()),
    }),
  };

  let created = intake::create_candidate(&s, &submission).await.unwrap();

  let fetched = intake::fetch_candidate(&s, created.candidate.id).await.unwrap();
  assert_eq!(fetched.candidate.first_name, "Albert");
  assert_eq!(fetched.candidate.last_name, "Saelices");
  assert_eq!(fetched.candidate.email, "albert.saelices@gmail.com");
  assert_eq!(fetched.educations.len(), 1);
  assert_eq!(fetched.educations[0].institution, "UC3M");
  assert_eq!(fetched.work_experiences.len(), 1);
  assert!(fetched.resume.is_some());
}
