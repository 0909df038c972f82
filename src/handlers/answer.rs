// src/handlers/answer.rs

use axum::{Json, extract::State, response::IntoResponse};
use sqlx::SqlitePool;

use crate::{
    engine,
    error::AppError,
    handlers::{question::question_exists, session::session_exists},
    models::answer::AnswerRequest,
};

/// Records an answer for a (session, question) pair and refreshes the
/// question's ratio in the same transaction.
///
/// Re-answering the same question overwrites the stored value and
/// timestamp instead of inserting a second row; the ratio refresh runs
/// on every write, including a no-op overwrite.
pub async fn record_answer(
    State(pool): State<SqlitePool>,
    Json(payload): Json<AnswerRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(question_id), Some(answer), Some(session_id)) =
        (payload.question_id, payload.answer, payload.session_id)
    else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    if answer != "A" && answer != "B" {
        return Err(AppError::BadRequest(
            "Answer must be either A or B".to_string(),
        ));
    }
    if !session_exists(&pool, &session_id).await? {
        return Err(AppError::BadRequest("Session ID does not exist".to_string()));
    }
    if !question_exists(&pool, question_id).await? {
        return Err(AppError::BadRequest("Question ID does not exist".to_string()));
    }

    let mut tx = pool.begin().await?;

    sqlx::query(
        "INSERT INTO answers (session_id, question_id, answer_value)
         VALUES (?, ?, ?)
         ON CONFLICT (session_id, question_id)
         DO UPDATE SET answer_value = excluded.answer_value,
                       created_at = CURRENT_TIMESTAMP",
    )
    .bind(&session_id)
    .bind(question_id)
    .bind(&answer)
    .execute(&mut *tx)
    .await?;

    engine::refresh_ratio(&mut tx, question_id).await?;

    tx.commit().await?;

    Ok(Json(serde_json::json!({ "success": true })))
}
