//! SQL schema for the roster SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS candidates (
    candidate_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name   TEXT NOT NULL,
    last_name    TEXT NOT NULL,
    email        TEXT NOT NULL UNIQUE,
    phone        TEXT,
    address      TEXT
);

-- Child tables are append-only from the intake workflow's point of view.
-- No UPDATE or DELETE is ever issued against them by this crate.
CREATE TABLE IF NOT EXISTS educations (
    education_id INTEGER PRIMARY KEY AUTOINCREMENT,
    candidate_id INTEGER NOT NULL REFERENCES candidates(candidate_id),
    institution  TEXT NOT NULL,
    title        TEXT,
    start_date   TEXT NOT NULL,   -- YYYY-MM-DD
    end_date     TEXT             -- NULL means open-ended
);

CREATE TABLE IF NOT EXISTS work_experiences (
    experience_id INTEGER PRIMARY KEY AUTOINCREMENT,
    candidate_id  INTEGER NOT NULL REFERENCES candidates(candidate_id),
    company       TEXT NOT NULL,
    position      TEXT NOT NULL,
    description   TEXT,
    start_date    TEXT NOT NULL,  -- YYYY-MM-DD
    end_date      TEXT            -- NULL means current position
);

-- At most one résumé per candidate.
CREATE TABLE IF NOT EXISTS resumes (
    resume_id    INTEGER PRIMARY KEY AUTOINCREMENT,
    candidate_id INTEGER NOT NULL UNIQUE REFERENCES candidates(candidate_id),
    file_path    TEXT NOT NULL,
    file_type    TEXT NOT NULL,
    upload_date  TEXT NOT NULL    -- ISO 8601 UTC; server-assigned
);

CREATE INDEX IF NOT EXISTS educations_candidate_idx       ON educations(candidate_id);
CREATE INDEX IF NOT EXISTS work_experiences_candidate_idx ON work_experiences(candidate_id);

PRAGMA user_version = 1;
";
