// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use validator::Validate;

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,

    /// The session that submitted this question.
    pub session_id: String,

    /// The text of the question itself.
    pub text: String,

    /// Label shown for answer 'A'.
    pub option_a: String,

    /// Label shown for answer 'B'.
    pub option_b: String,

    /// Cached discrimination score in [0, 0.5]; NULL until the question
    /// has been answered at least once. Overwritten on every answer.
    pub ratio: Option<f64>,

    pub created_at: Option<chrono::NaiveDateTime>,
}

/// DTO for submitting a new question.
///
/// Fields are optional so presence can be checked by hand with the
/// legacy error message; the validator caps guard against oversized
/// payloads once presence is established.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitQuestionRequest {
    #[validate(length(max = 1000))]
    pub text: Option<String>,
    #[validate(length(max = 200))]
    pub option_a: Option<String>,
    #[validate(length(max = 200))]
    pub option_b: Option<String>,
    pub session_id: Option<String>,
}

/// DTO referencing a question on behalf of a session (skip, flag).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRefRequest {
    pub question_id: Option<i64>,
    pub session_id: Option<String>,
}

/// Query parameters for GET /api/questions/stats.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionQuery {
    pub question_id: Option<i64>,
}

/// Response for GET /api/questions/next.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionResponse {
    pub question_id: i64,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
}

/// Response for GET /api/questions/stats.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStatsResponse {
    pub question_id: i64,
    pub text: String,
    pub option_a: String,
    pub option_b: String,
    /// Rounded to the nearest integer, 0 when nobody has answered.
    pub percent_a: i64,
    pub percent_b: i64,
    pub total: i64,
}
