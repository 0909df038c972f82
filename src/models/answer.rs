// src/models/answer.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Represents the 'answers' table in the database.
/// One row per (session, question) pair; re-answering overwrites.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub session_id: String,
    pub question_id: i64,
    /// Either "A" or "B".
    pub answer_value: String,
    pub created_at: Option<chrono::NaiveDateTime>,
}

/// DTO for POST /api/answer.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    pub question_id: Option<i64>,
    pub answer: Option<String>,
    pub session_id: Option<String>,
}

/// One entry of the recent-answers list in GET /api/session/stats.
#[derive(Debug, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentAnswer {
    pub question_id: i64,
    pub answer_value: String,
}
