//! [`SqliteStore`] — the SQLite implementation of [`CandidateStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use roster_core::{
  domain::{
    Candidate, CandidateId, CandidateProfile, Education, NewCandidate, NewEducation,
    NewResume, NewWorkExperience, Resume, WorkExperience,
  },
  store::CandidateStore,
};

use crate::{
  encode::{RawCandidate, RawEducation, RawResume, RawWorkExperience, encode_date, encode_dt},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A candidate roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Error classification ────────────────────────────────────────────────────

/// Whether `e` is the unique-constraint violation on `candidates.email`.
fn is_email_unique_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, Some(msg)))
      if f.code == rusqlite::ErrorCode::ConstraintViolation
        && msg.contains("candidates.email")
  )
}

/// Whether `e` is a foreign-key violation (child insert against a missing
/// candidate row).
fn is_fk_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, Some(msg)))
      if f.code == rusqlite::ErrorCode::ConstraintViolation
        && msg.contains("FOREIGN KEY")
  )
}

fn classify_child_insert_err(e: tokio_rusqlite::Error, candidate_id: CandidateId) -> Error {
  if is_fk_violation(&e) {
    Error::CandidateNotFound(candidate_id)
  } else {
    Error::Database(e)
  }
}

// ─── CandidateStore impl ─────────────────────────────────────────────────────

impl CandidateStore for SqliteStore {
  type Error = Error;

  fn is_duplicate_email(err: &Error) -> bool {
    matches!(err, Error::DuplicateEmail(_))
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn create_candidate(&self, fields: NewCandidate) -> Result<Candidate> {
    let f = fields.clone();
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO candidates (first_name, last_name, email, phone, address)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![f.first_name, f.last_name, f.email, f.phone, f.address],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| {
        if is_email_unique_violation(&e) {
          Error::DuplicateEmail(fields.email.clone())
        } else {
          Error::Database(e)
        }
      })?;

    Ok(Candidate {
      id,
      first_name: fields.first_name,
      last_name: fields.last_name,
      email: fields.email,
      phone: fields.phone,
      address: fields.address,
    })
  }

  async fn create_education(
    &self,
    candidate_id: CandidateId,
    fields: NewEducation,
  ) -> Result<Education> {
    let f = fields.clone();
    let start_str = encode_date(f.start_date);
    let end_str = f.end_date.map(encode_date);
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO educations (candidate_id, institution, title, start_date, end_date)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![candidate_id, f.institution, f.title, start_str, end_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| classify_child_insert_err(e, candidate_id))?;

    Ok(Education {
      id,
      candidate_id,
      institution: fields.institution,
      title: fields.title,
      start_date: fields.start_date,
      end_date: fields.end_date,
    })
  }

  async fn create_work_experience(
    &self,
    candidate_id: CandidateId,
    fields: NewWorkExperience,
  ) -> Result<WorkExperience> {
    let f = fields.clone();
    let start_str = encode_date(f.start_date);
    let end_str = f.end_date.map(encode_date);
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO work_experiences
             (candidate_id, company, position, description, start_date, end_date)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![
            candidate_id,
            f.company,
            f.position,
            f.description,
            start_str,
            end_str
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| classify_child_insert_err(e, candidate_id))?;

    Ok(WorkExperience {
      id,
      candidate_id,
      company: fields.company,
      position: fields.position,
      description: fields.description,
      start_date: fields.start_date,
      end_date: fields.end_date,
    })
  }

  async fn create_resume(
    &self,
    candidate_id: CandidateId,
    fields: NewResume,
  ) -> Result<Resume> {
    let upload_date = Utc::now();
    let f = fields.clone();
    let uploaded_str = encode_dt(upload_date);
    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO resumes (candidate_id, file_path, file_type, upload_date)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![candidate_id, f.file_path, f.file_type, uploaded_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await
      .map_err(|e| classify_child_insert_err(e, candidate_id))?;

    Ok(Resume {
      id,
      candidate_id,
      file_path: fields.file_path,
      file_type: fields.file_type,
      upload_date,
    })
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn find_candidate(&self, id: CandidateId) -> Result<Option<Candidate>> {
    let raw: Option<RawCandidate> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT candidate_id, first_name, last_name, email, phone, address
               FROM candidates WHERE candidate_id = ?1",
              rusqlite::params![id],
              |row| {
                Ok(RawCandidate {
                  candidate_id: row.get(0)?,
                  first_name:   row.get(1)?,
                  last_name:    row.get(2)?,
                  email:        row.get(3)?,
                  phone:        row.get(4)?,
                  address:      row.get(5)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    Ok(raw.map(RawCandidate::into_candidate))
  }

  async fn get_candidate(&self, id: CandidateId) -> Result<Option<CandidateProfile>> {
    type RawProfile =
      (RawCandidate, Vec<RawEducation>, Vec<RawWorkExperience>, Option<RawResume>);

    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        let candidate = conn
          .query_row(
            "SELECT candidate_id, first_name, last_name, email, phone, address
             FROM candidates WHERE candidate_id = ?1",
            rusqlite::params![id],
            |row| {
              Ok(RawCandidate {
                candidate_id: row.get(0)?,
                first_name:   row.get(1)?,
                last_name:    row.get(2)?,
                email:        row.get(3)?,
                phone:        row.get(4)?,
                address:      row.get(5)?,
              })
            },
          )
          .optional()?;

        let Some(candidate) = candidate else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(
          "SELECT education_id, candidate_id, institution, title, start_date, end_date
           FROM educations WHERE candidate_id = ?1 ORDER BY education_id",
        )?;
        let educations = stmt
          .query_map(rusqlite::params![id], |row| {
            Ok(RawEducation {
              education_id: row.get(0)?,
              candidate_id: row.get(1)?,
              institution:  row.get(2)?,
              title:        row.get(3)?,
              start_date:   row.get(4)?,
              end_date:     row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(
          "SELECT experience_id, candidate_id, company, position, description,
                  start_date, end_date
           FROM work_experiences WHERE candidate_id = ?1 ORDER BY experience_id",
        )?;
        let work_experiences = stmt
          .query_map(rusqlite::params![id], |row| {
            Ok(RawWorkExperience {
              experience_id: row.get(0)?,
              candidate_id:  row.get(1)?,
              company:       row.get(2)?,
              position:      row.get(3)?,
              description:   row.get(4)?,
              start_date:    row.get(5)?,
              end_date:      row.get(6)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let resume = conn
          .query_row(
            "SELECT resume_id, candidate_id, file_path, file_type, upload_date
             FROM resumes WHERE candidate_id = ?1",
            rusqlite::params![id],
            |row| {
              Ok(RawResume {
                resume_id:    row.get(0)?,
                candidate_id: row.get(1)?,
                file_path:    row.get(2)?,
                file_type:    row.get(3)?,
                upload_date:  row.get(4)?,
              })
            },
          )
          .optional()?;

        Ok(Some((candidate, educations, work_experiences, resume)))
      })
      .await?;

    let Some((candidate, educations, work_experiences, resume)) = raw else {
      return Ok(None);
    };

    Ok(Some(CandidateProfile {
      candidate:        candidate.into_candidate(),
      educations:       educations
        .into_iter()
        .map(RawEducation::into_education)
        .collect::<Result<Vec<_>>>()?,
      work_experiences: work_experiences
        .into_iter()
        .map(RawWorkExperience::into_work_experience)
        .collect::<Result<Vec<_>>>()?,
      resume:           resume.map(RawResume::into_resume).transpose()?,
    }))
  }

  async fn list_candidates(&self) -> Result<Vec<Candidate>> {
    let raws: Vec<RawCandidate> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT candidate_id, first_name, last_name, email, phone, address
           FROM candidates ORDER BY candidate_id",
        )?;
        let rows = stmt
          .query_map([], |row| {
            Ok(RawCandidate {
              candidate_id: row.get(0)?,
              first_name:   row.get(1)?,
              last_name:    row.get(2)?,
              email:        row.get(3)?,
              phone:        row.get(4)?,
              address:      row.get(5)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(raws.into_iter().map(RawCandidate::into_candidate).collect())
  }
}
