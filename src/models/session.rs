// src/models/session.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::answer::{Answer, RecentAnswer};
use crate::models::question::Question;

/// Represents the 'sessions' table in the database.
/// Sessions are anonymous: an opaque UUID and a creation timestamp,
/// created on first visit and never deleted.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub created_at: Option<chrono::NaiveDateTime>,
}

/// Response for POST /api/session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCreatedResponse {
    pub session_id: String,
}

/// Query parameters for endpoints keyed by session.
/// The field is optional so a missing parameter surfaces as a JSON 400
/// instead of an extractor rejection.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionQuery {
    pub session_id: Option<String>,
}

/// Response for GET /api/info.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfoResponse {
    pub question_count: i64,
}

/// Response for GET /api/data: everything the session itself has
/// submitted and answered.
#[derive(Debug, Serialize)]
pub struct SessionDataResponse {
    pub questions: Vec<Question>,
    pub answers: Vec<Answer>,
}

/// Response for GET /api/session/stats.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatsResponse {
    pub session_id: String,
    pub question_count: i64,
    /// Newest first, at most 10 entries.
    pub recent_answers: Vec<RecentAnswer>,
}
