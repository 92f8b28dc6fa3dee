//! API surface tests over in-process doubles.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use comenius_core::{GenerateRequest, GenerateResponse, LessonStatus};
use comenius_database::{LessonRepository, MemoryLessonRepository};
use comenius_error::{ComeniusResult, ModelsError, ModelsErrorKind};
use comenius_generation::GenerationService;
use comenius_interface::CompletionDriver;
use comenius_server::{create_router, AppState};
use comenius_storage::{FileSystemStorage, LessonStorage};
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;
use uuid::Uuid;

const VALID_DOCUMENT: &str = r#"{
  "format": "lesson/v1",
  "title": "Addition quiz",
  "root": {
    "type": "quiz",
    "questions": [
      { "id": 1, "prompt": "What is 2 + 3?", "options": ["4", "5"], "answer": 1 }
    ]
  }
}"#;

struct ScriptedDriver {
    fail: bool,
}

#[async_trait]
impl CompletionDriver for ScriptedDriver {
    async fn generate(&self, _req: &GenerateRequest) -> ComeniusResult<GenerateResponse> {
        if self.fail {
            Err(ModelsError::new(ModelsErrorKind::Api {
                status: 500,
                message: "model unavailable".to_string(),
            })
            .into())
        } else {
            Ok(GenerateResponse {
                text: VALID_DOCUMENT.to_string(),
            })
        }
    }

    fn provider_name(&self) -> &'static str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }
}

struct TestApp {
    router: Router,
    state: AppState,
    repository: Arc<MemoryLessonRepository>,
    _store_dir: TempDir,
}

fn app(fail_model: bool) -> TestApp {
    let repository = Arc::new(MemoryLessonRepository::new());
    let store_dir = TempDir::new().unwrap();
    let storage: Arc<dyn LessonStorage> =
        Arc::new(FileSystemStorage::new(store_dir.path()).unwrap());
    let generation = GenerationService::new(
        Arc::new(ScriptedDriver { fail: fail_model }),
        repository.clone(),
        storage.clone(),
    );
    let state = AppState::new(repository.clone(), storage, generation);
    TestApp {
        router: create_router(state.clone()),
        state,
        repository,
        _store_dir: store_dir,
    }
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn submitting_an_outline_creates_a_generating_lesson() {
    let app = app(false);

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/lessons",
            json!({ "outline": "A 3 question quiz on addition" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["status"], "generating");
    assert_eq!(body["title"], "A 3 question quiz on addition");

    // Background generation completes and the record lands generated.
    let id: Uuid = body["id"].as_str().unwrap().parse().unwrap();
    app.state.tasks.join(id).await.unwrap();
    let record = app.repository.get_lesson(id).await.unwrap().unwrap();
    assert_eq!(record.status, LessonStatus::Generated);
    assert!(record.file_path.is_some());
}

#[tokio::test]
async fn a_blank_outline_is_rejected_without_a_record() {
    let app = app(false);

    let response = app
        .router
        .clone()
        .oneshot(json_request("POST", "/api/lessons", json!({ "outline": "  " })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(app.repository.list_lessons(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn synchronous_generation_reports_success() {
    let app = app(false);
    let lesson = app.repository.create_lesson("addition").await.unwrap();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/generate-lesson",
            json!({ "lessonId": lesson.id, "outline": "addition" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["lessonId"], lesson.id.to_string());
    assert!(body.get("stored").is_none());
}

#[tokio::test]
async fn synchronous_generation_requires_a_lesson_id() {
    let app = app(false);

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/generate-lesson",
            json!({ "outline": "addition" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn a_model_failure_surfaces_as_a_server_error() {
    let app = app(true);
    let lesson = app.repository.create_lesson("addition").await.unwrap();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/generate-lesson",
            json!({ "lessonId": lesson.id, "outline": "addition" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let record = app.repository.get_lesson(lesson.id).await.unwrap().unwrap();
    assert_eq!(record.status, LessonStatus::Failed);
    assert!(record.error.is_some());
}

#[tokio::test]
async fn an_unknown_lesson_is_a_404() {
    let app = app(false);

    let response = app
        .router
        .clone()
        .oneshot(get_request(&format!("/api/lessons/{}", Uuid::new_v4())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lessons_list_newest_first() {
    let app = app(false);
    app.repository.create_lesson("first").await.unwrap();
    app.repository.create_lesson("second").await.unwrap();

    let response = app
        .router
        .clone()
        .oneshot(get_request("/api/lessons"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["second", "first"]);
}

#[tokio::test]
async fn retrying_a_failed_lesson_reenqueues_generation() {
    let app = app(false);
    let lesson = app.repository.create_lesson("addition").await.unwrap();
    app.repository
        .mark_failed(lesson.id, "model unavailable")
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/lessons/{}/retry", lesson.id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::ACCEPTED);

    app.state.tasks.join(lesson.id).await.unwrap();
    let record = app.repository.get_lesson(lesson.id).await.unwrap().unwrap();
    assert_eq!(record.status, LessonStatus::Generated);
    assert!(record.error.is_none());
}

#[tokio::test]
async fn retrying_a_generated_lesson_conflicts() {
    let app = app(false);
    let lesson = app.repository.create_lesson("addition").await.unwrap();
    app.repository
        .mark_generated_content(lesson.id, VALID_DOCUMENT)
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/lessons/{}/retry", lesson.id),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn the_view_shows_a_notice_while_generating() {
    let app = app(false);
    let lesson = app.repository.create_lesson("addition").await.unwrap();

    let response = app
        .router
        .clone()
        .oneshot(get_request(&format!("/lessons/{}/view", lesson.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("still being generated"));
}

#[tokio::test]
async fn retrying_an_unknown_lesson_is_a_404() {
    let app = app(false);

    let response = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            &format!("/api/lessons/{}/retry", Uuid::new_v4()),
            json!({}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn the_view_shows_the_stored_error_for_a_failed_lesson() {
    let app = app(false);
    let lesson = app.repository.create_lesson("addition").await.unwrap();
    app.repository
        .mark_failed(lesson.id, "model unavailable")
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(get_request(&format!("/lessons/{}/view", lesson.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response).await.contains("model unavailable"));
}

#[tokio::test]
async fn the_view_renders_a_generated_lesson() {
    let app = app(false);
    let lesson = app.repository.create_lesson("addition").await.unwrap();
    app.repository
        .mark_generated_content(lesson.id, VALID_DOCUMENT)
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(get_request(&format!("/lessons/{}/view", lesson.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("Addition quiz"));
    assert!(html.contains("What is 2 + 3?"));
}

#[tokio::test]
async fn invalid_stored_content_collapses_to_the_unavailable_panel() {
    let app = app(false);
    let lesson = app.repository.create_lesson("addition").await.unwrap();
    app.repository
        .mark_generated_content(lesson.id, "not a lesson document")
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(get_request(&format!("/lessons/{}/view", lesson.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("currently unavailable"));
    assert!(!html.contains("not a lesson document"));
}
