//! HTTP API for lesson submission, generation, and retrieval.

use crate::state::AppState;
use crate::view::view_lesson;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use comenius_error::{
    ComeniusError, ComeniusErrorKind, DatabaseErrorKind, GenerationErrorKind, ServerErrorKind,
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Maximum number of records returned by the list endpoint.
const LIST_LIMIT: i64 = 50;

/// Creates the lesson API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/lessons", post(create_lesson).get(list_lessons))
        .route("/api/lessons/:id", get(get_lesson))
        .route("/api/lessons/:id/retry", post(retry_lesson))
        .route("/api/generate-lesson", post(generate_lesson))
        .route("/lessons/:id/view", get(view_lesson))
        .with_state(state)
}

#[derive(Debug, Deserialize)]
struct CreateLessonRequest {
    outline: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateLessonRequest {
    lesson_id: Option<Uuid>,
    outline: Option<String>,
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Create a lesson record and hand generation to the task registry.
async fn create_lesson(
    State(state): State<AppState>,
    Json(payload): Json<CreateLessonRequest>,
) -> impl IntoResponse {
    let outline = match present(payload.outline.as_deref(), "outline") {
        Ok(outline) => outline.to_string(),
        Err(response) => return response,
    };

    let record = match state.repository.create_lesson(&outline).await {
        Ok(record) => record,
        Err(e) => return error_response(&e),
    };
    info!(lesson_id = %record.id, "Lesson created");

    let generation = state.generation.clone();
    let lesson_id = record.id;
    let handoff = state.tasks.spawn(lesson_id, async move {
        if let Err(e) = generation.generate(lesson_id, &outline).await {
            warn!(lesson_id = %lesson_id, error = %e, "Background generation failed");
        }
    });
    if let Err(e) = handoff {
        error!(lesson_id = %lesson_id, error = %e, "Generation handoff failed");
        return error_response(&e);
    }

    (StatusCode::CREATED, Json(json!(record))).into_response()
}

/// Generate a lesson synchronously.
async fn generate_lesson(
    State(state): State<AppState>,
    Json(payload): Json<GenerateLessonRequest>,
) -> impl IntoResponse {
    let lesson_id = match payload.lesson_id {
        Some(id) => id,
        None => return bad_request("lessonId is required"),
    };
    let outline = match present(payload.outline.as_deref(), "outline") {
        Ok(outline) => outline,
        Err(response) => return response,
    };

    match state.generation.generate(lesson_id, outline).await {
        Ok(outcome) => {
            let mut body = json!({ "success": true, "lessonId": lesson_id });
            if outcome.stored_in_database() {
                body["stored"] = json!("database");
            }
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => error_response(&e),
    }
}

/// List lessons, newest first.
async fn list_lessons(State(state): State<AppState>) -> impl IntoResponse {
    match state.repository.list_lessons(LIST_LIMIT).await {
        Ok(records) => (StatusCode::OK, Json(json!(records))).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Fetch a single lesson record.
async fn get_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    match state.repository.get_lesson(id).await {
        Ok(Some(record)) => (StatusCode::OK, Json(json!(record))).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "lesson not found" })),
        )
            .into_response(),
        Err(e) => error_response(&e),
    }
}

/// Reset a failed lesson and re-enqueue generation.
async fn retry_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let record = match state.generation.prepare_retry(id).await {
        Ok(record) => record,
        Err(e) => return error_response(&e),
    };
    info!(lesson_id = %id, "Lesson reset for retry");

    let generation = state.generation.clone();
    let outline = record.outline.clone();
    let handoff = state.tasks.spawn(id, async move {
        if let Err(e) = generation.generate(id, &outline).await {
            warn!(lesson_id = %id, error = %e, "Retried generation failed");
        }
    });
    if let Err(e) = handoff {
        error!(lesson_id = %id, error = %e, "Generation handoff failed");
        return error_response(&e);
    }

    (StatusCode::ACCEPTED, Json(json!(record))).into_response()
}

fn present<'a>(
    value: Option<&'a str>,
    field: &str,
) -> Result<&'a str, axum::response::Response> {
    match value {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(bad_request(&format!("{field} is required"))),
    }
}

fn bad_request(message: &str) -> axum::response::Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "success": false, "error": message })),
    )
        .into_response()
}

/// Map pipeline errors onto the wire contract.
fn error_response(err: &ComeniusError) -> axum::response::Response {
    let status = error_status(err);
    if status.is_server_error() {
        error!(error = %err, "Request failed");
    } else {
        warn!(error = %err, "Request rejected");
    }
    (
        status,
        Json(json!({ "success": false, "error": err.kind().to_string() })),
    )
        .into_response()
}

fn error_status(err: &ComeniusError) -> StatusCode {
    match err.kind() {
        ComeniusErrorKind::Generation(e) => match &e.kind {
            GenerationErrorKind::MissingField(_) => StatusCode::BAD_REQUEST,
            GenerationErrorKind::LessonNotFound(_) => StatusCode::NOT_FOUND,
            GenerationErrorKind::NotRetryable { .. } => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
        ComeniusErrorKind::Database(e) => match &e.kind {
            DatabaseErrorKind::NotFound => StatusCode::NOT_FOUND,
            DatabaseErrorKind::InvalidTransition(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
        ComeniusErrorKind::Server(e) => match &e.kind {
            ServerErrorKind::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerErrorKind::NotFound(_) => StatusCode::NOT_FOUND,
            ServerErrorKind::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        },
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
