// src/handlers/session.rs

use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::{
        answer::{Answer, RecentAnswer},
        question::Question,
        session::{
            SessionCreatedResponse, SessionDataResponse, SessionInfoResponse, SessionQuery,
            SessionStatsResponse,
        },
    },
};

/// Returns whether a session id is present in the database.
pub(crate) async fn session_exists(pool: &SqlitePool, session_id: &str) -> Result<bool, AppError> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sessions WHERE id = ?")
        .bind(session_id)
        .fetch_one(pool)
        .await?;
    Ok(count > 0)
}

/// Issues a new anonymous session.
///
/// The id is an opaque UUID v4; the client keeps it (localStorage or
/// cookie) and sends it with every subsequent request.
pub async fn create_session(
    State(pool): State<SqlitePool>,
) -> Result<impl IntoResponse, AppError> {
    let session_id = Uuid::new_v4().to_string();

    sqlx::query("INSERT INTO sessions (id) VALUES (?)")
        .bind(&session_id)
        .execute(&pool)
        .await?;

    tracing::info!("Created session {}", session_id);

    Ok(Json(SessionCreatedResponse { session_id }))
}

/// Returns how many questions the session has answered.
pub async fn session_info(
    State(pool): State<SqlitePool>,
    Query(params): Query<SessionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session_id = params
        .session_id
        .ok_or_else(|| AppError::BadRequest("Missing sessionId".to_string()))?;

    if !session_exists(&pool, &session_id).await? {
        return Err(AppError::BadRequest("Session ID does not exist".to_string()));
    }

    let question_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM answers WHERE session_id = ?")
        .bind(&session_id)
        .fetch_one(&pool)
        .await?;

    Ok(Json(SessionInfoResponse { question_count }))
}

/// Dumps everything the session itself has contributed: the questions
/// it submitted and the answers it gave.
pub async fn session_data(
    State(pool): State<SqlitePool>,
    Query(params): Query<SessionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session_id = params
        .session_id
        .ok_or_else(|| AppError::BadRequest("Missing sessionId".to_string()))?;

    if !session_exists(&pool, &session_id).await? {
        return Err(AppError::BadRequest("Session ID does not exist".to_string()));
    }

    let questions = sqlx::query_as::<_, Question>(
        "SELECT id, session_id, text, option_a, option_b, ratio, created_at
         FROM questions WHERE session_id = ?",
    )
    .bind(&session_id)
    .fetch_all(&pool)
    .await?;

    let answers = sqlx::query_as::<_, Answer>(
        "SELECT session_id, question_id, answer_value, created_at
         FROM answers WHERE session_id = ?",
    )
    .bind(&session_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(SessionDataResponse { questions, answers }))
}

/// Per-session statistics: answered count plus the 10 most recent answers.
pub async fn session_stats(
    State(pool): State<SqlitePool>,
    Query(params): Query<SessionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let session_id = params
        .session_id
        .ok_or_else(|| AppError::BadRequest("Missing sessionId".to_string()))?;

    if !session_exists(&pool, &session_id).await? {
        return Err(AppError::NotFound("Session not found".to_string()));
    }

    let question_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM answers WHERE session_id = ?")
        .bind(&session_id)
        .fetch_one(&pool)
        .await?;

    let recent_answers = sqlx::query_as::<_, RecentAnswer>(
        "SELECT question_id, answer_value FROM answers
         WHERE session_id = ? ORDER BY created_at DESC LIMIT 10",
    )
    .bind(&session_id)
    .fetch_all(&pool)
    .await?;

    Ok(Json(SessionStatsResponse {
        session_id,
        question_count,
        recent_answers,
    }))
}
