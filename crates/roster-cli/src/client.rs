//! Async HTTP client wrapping the roster JSON API.

use anyhow::{Context, Result, anyhow};
use reqwest::{Client, StatusCode};
use roster_core::{
  FieldErrors,
  domain::{Candidate, CandidateId, CandidateProfile},
  submission::CandidateSubmission,
};
use serde::Deserialize;
use std::time::Duration;

/// Connection settings for the roster API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  pub base_url: String,
}

/// A rejected or failed submission, as the form needs to present it.
#[derive(Debug, Clone)]
pub enum SubmitError {
  /// The server rejected the submission (400) with per-field detail.
  Rejected {
    message: String,
    errors:  FieldErrors,
  },
  /// Transport failure or a non-400 error status.
  Failed(String),
}

/// Error body shape returned by the API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
  message: String,
  #[serde(default)]
  errors:  FieldErrors,
}

/// Async HTTP client for the roster JSON REST API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `GET /candidates`
  pub async fn list_candidates(&self) -> Result<Vec<Candidate>> {
    let resp = self
      .client
      .get(self.url("/candidates"))
      .send()
      .await
      .context("GET /candidates failed")?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /candidates → {}", resp.status()));
    }
    resp.json().await.context("deserialising candidates")
  }

  /// `GET /candidates/{id}`
  pub async fn get_candidate(&self, id: CandidateId) -> Result<CandidateProfile> {
    let resp = self
      .client
      .get(self.url(&format!("/candidates/{id}")))
      .send()
      .await
      .with_context(|| format!("GET /candidates/{id} failed"))?;

    if !resp.status().is_success() {
      return Err(anyhow!("GET /candidates/{id} → {}", resp.status()));
    }
    resp.json().await.context("deserialising candidate")
  }

  /// `POST /candidates`
  ///
  /// A 400 response is surfaced as [`SubmitError::Rejected`] with the
  /// server's field-error map so the form can render it inline.
  pub async fn create_candidate(
    &self,
    submission: &CandidateSubmission,
  ) -> Result<CandidateProfile, SubmitError> {
    let resp = self
      .client
      .post(self.url("/candidates"))
      .json(submission)
      .send()
      .await
      .map_err(|e| SubmitError::Failed(e.to_string()))?;

    match resp.status() {
      StatusCode::CREATED => resp
        .json()
        .await
        .map_err(|e| SubmitError::Failed(format!("deserialising response: {e}"))),
      StatusCode::BAD_REQUEST => {
        let body: ErrorBody = resp
          .json()
          .await
          .unwrap_or_else(|_| ErrorBody {
            message: "invalid submission".to_owned(),
            errors:  FieldErrors::default(),
          });
        Err(SubmitError::Rejected {
          message: body.message,
          errors:  body.errors,
        })
      }
      status => Err(SubmitError::Failed(format!("server returned {status}"))),
    }
  }
}
