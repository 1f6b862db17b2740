//! System Endpoints
//!
//! Unauthenticated operational endpoints: a health probe reporting
//! database liveness, and the database's current time. The latter reads
//! `NOW()` through the ordinary pool path, so it doubles as a smoke test
//! for the read pipeline.

use axum::extract::State;
use axum::response::Json;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

use crate::db::Database;
use crate::error::AppError;

/// Handle GET /healthcheck
///
/// Always 200 while the process is up; the body reports whether the
/// database answers.
pub async fn healthcheck(State(db): State<Database>) -> Json<Value> {
    let database = if db.is_reachable().await { "up" } else { "down" };

    Json(json!({
        "status": "ok",
        "database": database,
    }))
}

/// Handle GET /api/servertime
///
/// Returns the database's clock, not the process clock.
pub async fn servertime(State(db): State<Database>) -> Result<Json<Value>, AppError> {
    let (now,): (DateTime<Utc>,) = db.fetch_one(sqlx::query_as("SELECT NOW()")).await?;

    Ok(Json(json!({
        "servertime": now.to_rfc3339(),
    })))
}
