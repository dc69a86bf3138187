//! Router tests driving the full HTTP surface against an in-memory store.

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use roster_store_sqlite::SqliteStore;
use serde_json::{Value, json};
use tower::ServiceExt as _;

use crate::api_router;

async fn app() -> Router {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  api_router(Arc::new(store))
}

async fn body_json(body: Body) -> Value {
  let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

fn get(path: &str) -> Request<Body> {
  Request::builder().uri(path).body(Body::empty()).unwrap()
}

fn post_json(path: &str, body: &Value) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(path)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

fn albert_payload() -> Value {
  json!({
    "firstName": "Albert",
    "lastName": "Saelices",
    "email": "albert.saelices@gmail.com",
    "phone": "656874937",
    "address": "Calle Sant Dalmir 2, 5ºB. Barcelona",
    "educations": [{
      "institution": "UC3M",
      "title": "Computer Science",
      "startDate": "2006-12-31",
      "endDate": "2010-12-26"
    }],
    "workExperiences": [{
      "company": "Coca Cola",
      "position": "SWE",
      "description": "",
      "startDate": "2011-01-13",
      "endDate": "2013-01-17"
    }],
    "cv": {
      "filePath": "uploads/1715760936750-cv.pdf",
      "fileType": "application/pdf"
    }
  })
}

// ─── Health ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn health_always_returns_ok() {
  let resp = app().await.oneshot(get("/health")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp.into_body()).await, json!({ "status": "OK" }));
}

// ─── List ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_on_empty_store_returns_empty_array() {
  let resp = app().await.oneshot(get("/candidates")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(body_json(resp.into_body()).await, json!([]));
}

#[tokio::test]
async fn list_returns_candidates_without_children() {
  let app = app().await;
  app
    .clone()
    .oneshot(post_json("/candidates", &albert_payload()))
    .await
    .unwrap();

  let resp = app.oneshot(get("/candidates")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);

  let body = body_json(resp.into_body()).await;
  let rows = body.as_array().unwrap();
  assert_eq!(rows.len(), 1);
  assert_eq!(rows[0]["firstName"], "Albert");
  assert!(rows[0].get("educations").is_none());
}

// ─── Create ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_valid_submission_returns_201() {
  let resp = app()
    .await
    .oneshot(post_json("/candidates", &albert_payload()))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body = body_json(resp.into_body()).await;
  assert_eq!(body["firstName"], "Albert");
  assert_eq!(body["lastName"], "Saelices");
  assert_eq!(body["email"], "albert.saelices@gmail.com");
  assert!(body["id"].as_i64().unwrap() > 0);
  assert_eq!(body["educations"].as_array().unwrap().len(), 1);
  assert_eq!(body["workExperiences"].as_array().unwrap().len(), 1);
  assert!(body["resume"].is_object());
}

#[tokio::test]
async fn create_minimal_submission_returns_201() {
  let payload = json!({
    "firstName": "Ada",
    "lastName": "Lovelace",
    "email": "ada@analytical.engine"
  });
  let resp = app()
    .await
    .oneshot(post_json("/candidates", &payload))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::CREATED);

  let body = body_json(resp.into_body()).await;
  assert_eq!(body["educations"], json!([]));
  assert_eq!(body["resume"], Value::Null);
}

#[tokio::test]
async fn create_invalid_submission_returns_400_with_field_errors() {
  let payload = json!({ "firstName": "  ", "email": "not-an-email" });
  let resp = app()
    .await
    .oneshot(post_json("/candidates", &payload))
    .await
    .unwrap();
  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

  let body = body_json(resp.into_body()).await;
  assert!(body["message"].is_string());
  assert_eq!(body["errors"]["firstName"], "firstName required");
  assert_eq!(body["errors"]["lastName"], "lastName required");
  assert_eq!(body["errors"]["email"], "invalid email format");
}

#[tokio::test]
async fn create_duplicate_email_returns_400() {
  let app = app().await;
  let first = app
    .clone()
    .oneshot(post_json("/candidates", &albert_payload()))
    .await
    .unwrap();
  assert_eq!(first.status(), StatusCode::CREATED);

  let second = app
    .oneshot(post_json("/candidates", &albert_payload()))
    .await
    .unwrap();
  assert_eq!(second.status(), StatusCode::BAD_REQUEST);

  let body = body_json(second.into_body()).await;
  assert!(
    body["message"]
      .as_str()
      .unwrap()
      .contains("albert.saelices@gmail.com")
  );
}

// ─── Get one ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn get_missing_candidate_returns_404_with_message() {
  let resp = app().await.oneshot(get("/candidates/999")).await.unwrap();
  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  assert_eq!(
    body_json(resp.into_body()).await,
    json!({ "message": "Candidate not found" })
  );
}

#[tokio::test]
async fn created_candidate_roundtrips_by_id() {
  let app = app().await;
  let created = app
    .clone()
    .oneshot(post_json("/candidates", &albert_payload()))
    .await
    .unwrap();
  let id = body_json(created.into_body()).await["id"].as_i64().unwrap();

  let resp = app.oneshot(get(&format!("/candidates/{id}"))).await.unwrap();
  assert_eq!(resp.status(), StatusCode::OK);

  let body = body_json(resp.into_body()).await;
  assert_eq!(body["id"], id);
  assert_eq!(body["firstName"], "Albert");
  assert_eq!(body["lastName"], "Saelices");
  assert_eq!(body["email"], "albert.saelices@gmail.com");

  let educations = body["educations"].as_array().unwrap();
  assert_eq!(educations.len(), 1);
  assert_eq!(educations[0]["institution"], "UC3M");
  assert_eq!(educations[0]["startDate"], "2006-12-31");
}
