//! `GET /health` — liveness probe.

use axum::Json;
use serde_json::{Value, json};

/// Always `200 {"status":"OK"}`.
pub async fn check() -> Json<Value> {
  Json(json!({ "status": "OK" }))
}
