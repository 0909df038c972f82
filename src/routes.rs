// src/routes.rs

use axum::{
    Json, Router,
    handler::HandlerWithoutStateExt,
    http::{Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

use crate::{
    handlers::{answer, question, session},
    state::AppState,
};

/// JSON 404 for anything that is neither an API route nor a static file.
async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Not Found" })),
    )
}

/// Assembles the main application router.
///
/// * Mounts the JSON API under `/api`.
/// * Serves the static front-end from the public directory as fallback.
/// * Applies global middleware (Trace, CORS).
/// * Injects global state (Database Pool).
pub fn create_router(state: AppState) -> Router {
    let origins = [
        format!("http://localhost:{}", state.config.port)
            .parse()
            .unwrap(),
        format!("http://127.0.0.1:{}", state.config.port)
            .parse()
            .unwrap(),
    ];

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/session", post(session::create_session))
        .route("/session/stats", get(session::session_stats))
        .route("/info", get(session::session_info))
        .route("/data", get(session::session_data))
        .route("/answer", post(answer::record_answer))
        .route("/questions/next", get(question::next_question))
        .route("/questions/submit", post(question::submit_question))
        .route("/questions/skip", post(question::skip_question))
        .route("/questions/flag", post(question::flag_question))
        .route("/questions/stats", get(question::question_stats));

    let static_files =
        ServeDir::new(&state.config.public_dir).not_found_service(not_found.into_service());

    Router::new()
        .nest("/api", api_routes)
        .fallback_service(static_files)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
