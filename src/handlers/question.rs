// src/handlers/question.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    engine,
    error::AppError,
    handlers::session::session_exists,
    models::question::{
        NextQuestionResponse, Question, QuestionQuery, QuestionRefRequest, QuestionStatsResponse,
        SubmitQuestionRequest,
    },
    models::session::SessionQuery,
    utils::html::clean_html,
};

pub(crate) async fn question_exists(pool: &SqlitePool, question_id: i64) -> Result<bool, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE id = ?")
        .bind(question_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Accepts a new question into the bank.
///
/// The question text and both option labels are sanitized before any
/// content check, so a payload that is nothing but markup is rejected
/// as empty. Duplicate detection is exact-text within the submitting
/// session only.
pub async fn submit_question(
    State(pool): State<SqlitePool>,
    Json(payload): Json<SubmitQuestionRequest>,
) -> Result<impl IntoResponse, AppError> {
    payload
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let (Some(text), Some(option_a), Some(option_b), Some(session_id)) = (
        payload.text,
        payload.option_a,
        payload.option_b,
        payload.session_id,
    ) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    let text = clean_html(&text);
    let option_a = clean_html(&option_a);
    let option_b = clean_html(&option_b);

    if text.is_empty() || option_a.is_empty() || option_b.is_empty() {
        return Err(AppError::BadRequest(
            "Text, Option A and Option B must be non-empty strings".to_string(),
        ));
    }
    if option_a == option_b {
        return Err(AppError::BadRequest(
            "Option A and Option B cannot be the same".to_string(),
        ));
    }
    if !session_exists(&pool, &session_id).await? {
        return Err(AppError::BadRequest("Session ID does not exist".to_string()));
    }

    let duplicates: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM questions WHERE text = ? AND session_id = ?")
            .bind(&text)
            .bind(&session_id)
            .fetch_one(&pool)
            .await?;
    if duplicates > 0 {
        return Err(AppError::BadRequest("Question already exists".to_string()));
    }

    sqlx::query("INSERT INTO questions (session_id, text, option_a, option_b) VALUES (?, ?, ?, ?)")
        .bind(&session_id)
        .bind(&text)
        .bind(&option_a)
        .bind(&option_b)
        .execute(&pool)
        .await?;

    tracing::info!("Session {} submitted question: {}", session_id, text);

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Serves the next question for a session.
///
/// Candidates are every question the session has neither answered nor
/// skipped, in creation order with a random tie-break; the engine then
/// promotes whichever is scored closest to an even split. An empty
/// candidate set means the session has exhausted the bank.
pub async fn next_question(
    State(pool): State<SqlitePool>,
    Query(params): Query<SessionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session_id = params
        .session_id
        .ok_or_else(|| AppError::BadRequest("Missing sessionId".to_string()))?;

    if !session_exists(&pool, &session_id).await? {
        return Err(AppError::BadRequest("Session ID does not exist".to_string()));
    }

    let candidates = sqlx::query_as::<_, Question>(
        "SELECT id, session_id, text, option_a, option_b, ratio, created_at
         FROM questions
         WHERE id NOT IN (SELECT question_id FROM answers WHERE session_id = ?)
           AND id NOT IN (SELECT question_id FROM skipped_questions WHERE session_id = ?)
         ORDER BY created_at ASC, RANDOM()",
    )
    .bind(&session_id)
    .bind(&session_id)
    .fetch_all(&pool)
    .await?;

    let next = engine::pick_next(candidates)
        .ok_or_else(|| AppError::NotFound("No more questions available".to_string()))?;

    Ok(Json(NextQuestionResponse {
        question_id: next.id,
        text: next.text,
        option_a: next.option_a,
        option_b: next.option_b,
    }))
}

/// Marks a question as skipped for this session. Skipped questions are
/// permanently excluded from this session's rotation; repeating the
/// skip is a no-op.
pub async fn skip_question(
    State(pool): State<SqlitePool>,
    Json(payload): Json<QuestionRefRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(question_id), Some(session_id)) = (payload.question_id, payload.session_id) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    sqlx::query("INSERT OR IGNORE INTO skipped_questions (session_id, question_id) VALUES (?, ?)")
        .bind(&session_id)
        .bind(question_id)
        .execute(&pool)
        .await?;

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Logs a moderation flag for a question. Append-only; the same session
/// may flag the same question repeatedly.
pub async fn flag_question(
    State(pool): State<SqlitePool>,
    Json(payload): Json<QuestionRefRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(question_id), Some(session_id)) = (payload.question_id, payload.session_id) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    if !question_exists(&pool, question_id).await? {
        return Err(AppError::BadRequest("Question ID does not exist".to_string()));
    }

    sqlx::query("INSERT INTO flags (question_id, session_id) VALUES (?, ?)")
        .bind(question_id)
        .bind(&session_id)
        .execute(&pool)
        .await?;

    tracing::info!("Session {} flagged question {}", session_id, question_id);

    Ok(Json(serde_json::json!({ "success": true })))
}

/// Aggregate answer statistics for one question.
pub async fn question_stats(
    State(pool): State<SqlitePool>,
    Query(params): Query<QuestionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let question_id = params
        .question_id
        .ok_or_else(|| AppError::BadRequest("Missing questionId".to_string()))?;

    let question = sqlx::query_as::<_, Question>(
        "SELECT id, session_id, text, option_a, option_b, ratio, created_at
         FROM questions WHERE id = ?",
    )
    .bind(question_id)
    .fetch_optional(&pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Question not found".to_string()))?;

    let count_a: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM answers WHERE question_id = ? AND answer_value = 'A'",
    )
    .bind(question_id)
    .fetch_one(&pool)
    .await?;

    let count_b: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM answers WHERE question_id = ? AND answer_value = 'B'",
    )
    .bind(question_id)
    .fetch_one(&pool)
    .await?;

    let total = count_a + count_b;
    let (percent_a, percent_b) = if total > 0 {
        (
            ((count_a as f64 / total as f64) * 100.0).round() as i64,
            ((count_b as f64 / total as f64) * 100.0).round() as i64,
        )
    } else {
        (0, 0)
    };

    Ok(Json(QuestionStatsResponse {
        question_id: question.id,
        text: question.text,
        option_a: question.option_a,
        option_b: question.option_b,
        percent_a,
        percent_b,
        total,
    }))
}
