//! Server-side lesson view.

use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use comenius_core::{LessonRecord, LessonStatus};
use comenius_loader::{load_lesson, render_html, Environment, RuntimeBindings};
use tracing::warn;
use uuid::Uuid;

/// Render a lesson page.
///
/// Lessons still generating get a notice, failed lessons show their stored
/// error, and loader failures for generated lessons collapse to a generic
/// unavailable panel with the detail kept in the logs.
pub async fn view_lesson(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> impl IntoResponse {
    let record = match state.repository.get_lesson(id).await {
        Ok(Some(record)) => record,
        Ok(None) => {
            return (
                StatusCode::NOT_FOUND,
                Html(page("Lesson not found", "<p>No such lesson.</p>")),
            )
        }
        Err(e) => {
            warn!(lesson_id = %id, error = %e, "Lesson lookup failed");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(page("Lesson unavailable", UNAVAILABLE_PANEL)),
            );
        }
    };

    match record.status {
        LessonStatus::Generating => (
            StatusCode::OK,
            Html(page(
                &record.title,
                "<p class=\"notice\">This lesson is still being generated. Check back shortly.</p>",
            )),
        ),
        LessonStatus::Failed => {
            let message = record.error.as_deref().unwrap_or("Generation failed.");
            let body = format!("<p class=\"error\">{}</p>", escape(message));
            (StatusCode::OK, Html(page(&record.title, &body)))
        }
        LessonStatus::Generated => render_generated(&state, &record).await,
    }
}

async fn render_generated(state: &AppState, record: &LessonRecord) -> (StatusCode, Html<String>) {
    let bindings = RuntimeBindings::new(Environment::html(record.id));
    match load_lesson(record, state.storage.as_ref(), bindings).await {
        Ok(lesson) => {
            let content = render_html(&lesson.render());
            (StatusCode::OK, Html(page(lesson.title(), &content)))
        }
        Err(e) => {
            warn!(lesson_id = %record.id, error = %e, "Lesson failed to load");
            (
                StatusCode::OK,
                Html(page(&record.title, UNAVAILABLE_PANEL)),
            )
        }
    }
}

const UNAVAILABLE_PANEL: &str =
    "<p class=\"error\">This lesson's content is currently unavailable.</p>";

fn page(title: &str, body: &str) -> String {
    format!(
        "<!doctype html>\n<html>\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<h1>{title}</h1>\n{body}\n</body>\n</html>\n",
        title = escape(title),
        body = body
    )
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
