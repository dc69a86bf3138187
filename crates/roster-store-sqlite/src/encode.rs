//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Calendar dates are stored as `YYYY-MM-DD` strings; timestamps as RFC 3339.
//! Row ids are SQLite integers and pass through unchanged.

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::domain::{Candidate, Education, Resume, WorkExperience};

use crate::{Error, Result};

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Timestamps ──────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `candidates` row.
pub struct RawCandidate {
  pub candidate_id: i64,
  pub first_name:   String,
  pub last_name:    String,
  pub email:        String,
  pub phone:        Option<String>,
  pub address:      Option<String>,
}

impl RawCandidate {
  pub fn into_candidate(self) -> Candidate {
    Candidate {
      id:         self.candidate_id,
      first_name: self.first_name,
      last_name:  self.last_name,
      email:      self.email,
      phone:      self.phone,
      address:    self.address,
    }
  }
}

/// Raw values read directly from an `educations` row.
pub struct RawEducation {
  pub education_id: i64,
  pub candidate_id: i64,
  pub institution:  String,
  pub title:        Option<String>,
  pub start_date:   String,
  pub end_date:     Option<String>,
}

impl RawEducation {
  pub fn into_education(self) -> Result<Education> {
    Ok(Education {
      id:           self.education_id,
      candidate_id: self.candidate_id,
      institution:  self.institution,
      title:        self.title,
      start_date:   decode_date(&self.start_date)?,
      end_date:     self.end_date.as_deref().map(decode_date).transpose()?,
    })
  }
}

/// Raw values read directly from a `work_experiences` row.
pub struct RawWorkExperience {
  pub experience_id: i64,
  pub candidate_id:  i64,
  pub company:       String,
  pub position:      String,
  pub description:   Option<String>,
  pub start_date:    String,
  pub end_date:      Option<String>,
}

impl RawWorkExperience {
  pub fn into_work_experience(self) -> Result<WorkExperience> {
    Ok(WorkExperience {
      id:           self.experience_id,
      candidate_id: self.candidate_id,
      company:      self.company,
      position:     self.position,
      description:  self.description,
      start_date:   decode_date(&self.start_date)?,
      end_date:     self.end_date.as_deref().map(decode_date).transpose()?,
    })
  }
}

/// Raw values read directly from a `resumes` row.
pub struct RawResume {
  pub resume_id:    i64,
  pub candidate_id: i64,
  pub file_path:    String,
  pub file_type:    String,
  pub upload_date:  String,
}

impl RawResume {
  pub fn into_resume(self) -> Result<Resume> {
    Ok(Resume {
      id:           self.resume_id,
      candidate_id: self.candidate_id,
      file_path:    self.file_path,
      file_type:    self.file_type,
      upload_date:  decode_dt(&self.upload_date)?,
    })
  }
}
