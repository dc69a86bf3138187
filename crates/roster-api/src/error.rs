//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use roster_core::{FetchError, FieldErrors, IntakeError};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
///
/// Validation and duplicate-email failures map to 400, absent candidates to
/// 404, and everything the storage layer throws to 500.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("validation failed: {0}")]
  Validation(FieldErrors),

  #[error("email already registered: {0}")]
  DuplicateEmail(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn from_intake<E>(e: IntakeError<E>) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    match e {
      IntakeError::Invalid(errors) => ApiError::Validation(errors),
      IntakeError::DuplicateEmail(email) => ApiError::DuplicateEmail(email),
      IntakeError::Store(e) => ApiError::Store(Box::new(e)),
    }
  }

  pub fn from_fetch<E>(e: FetchError<E>) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    match e {
      FetchError::NotFound(_) => ApiError::NotFound("Candidate not found".to_owned()),
      FetchError::Store(e) => ApiError::Store(Box::new(e)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    match self {
      ApiError::Validation(errors) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": "Validation failed", "errors": errors })),
      )
        .into_response(),
      ApiError::DuplicateEmail(email) => (
        StatusCode::BAD_REQUEST,
        Json(json!({ "message": format!("Email already registered: {email}") })),
      )
        .into_response(),
      ApiError::NotFound(message) => {
        (StatusCode::NOT_FOUND, Json(json!({ "message": message }))).into_response()
      }
      ApiError::Store(e) => {
        tracing::error!(error = %e, "storage failure");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          Json(json!({ "message": e.to_string() })),
        )
          .into_response()
      }
    }
  }
}
