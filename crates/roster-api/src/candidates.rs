//! Handlers for `/candidates` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/candidates` | All rows, no children |
//! | `POST` | `/candidates` | Body: candidate submission; 201 on success |
//! | `GET`  | `/candidates/:id` | Row with children; 404 if not found |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  domain::{Candidate, CandidateId, CandidateProfile},
  intake,
  store::CandidateStore,
  submission::CandidateSubmission,
};

use crate::error::ApiError;

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /candidates`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Candidate>>, ApiError>
where
  S: CandidateStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let candidates = intake::list_candidates(store.as_ref())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(candidates))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /candidates` — body: a candidate submission.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Json(body): Json<CandidateSubmission>,
) -> Result<impl IntoResponse, ApiError>
where
  S: CandidateStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let profile = intake::create_candidate(store.as_ref(), &body)
    .await
    .map_err(ApiError::from_intake)?;
  tracing::info!(id = profile.candidate.id, "candidate created");
  Ok((StatusCode::CREATED, Json(profile)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /candidates/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  Path(id): Path<CandidateId>,
) -> Result<Json<CandidateProfile>, ApiError>
where
  S: CandidateStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let profile = intake::fetch_candidate(store.as_ref(), id)
    .await
    .map_err(ApiError::from_fetch)?;
  Ok(Json(profile))
}
