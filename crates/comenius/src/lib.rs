//! Comenius - AI Lesson Builder
//!
//! Comenius turns a plain-text outline into an interactive lesson: an LLM
//! generates a declarative `lesson/v1` document, the generation service
//! validates and persists it (object storage with a database fallback), and
//! the dynamic loader interprets it into a live, renderable component.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use comenius::{
//!     FileSystemStorage, GenerationService, MemoryLessonRepository, OpenAiClient,
//!     LessonRepository,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repository = Arc::new(MemoryLessonRepository::new());
//!     let storage = Arc::new(FileSystemStorage::new("./lessons")?);
//!     let driver = Arc::new(OpenAiClient::from_env("gpt-4o")?);
//!
//!     let service = GenerationService::new(driver, repository.clone(), storage);
//!     let record = repository.create_lesson("A 3 question quiz on fractions").await?;
//!     service.generate(record.id, &record.outline).await?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Comenius is organized as a workspace with focused crates:
//!
//! - `comenius_core` - Lesson record, status machine, and document schema
//! - `comenius_interface` - The `CompletionDriver` trait
//! - `comenius_error` - Error types
//! - `comenius_models` - LLM provider clients
//! - `comenius_storage` - Object storage for generated documents
//! - `comenius_database` - PostgreSQL lesson repository
//! - `comenius_generation` - The generation pipeline
//! - `comenius_loader` - Dynamic loading and interpretation
//! - `comenius_server` - The HTTP surface
//!
//! This crate re-exports the library layers for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use comenius_core::{
    derive_title, Action, Component, GenerateRequest, GenerateResponse, LessonDoc, LessonRecord,
    LessonStatus, Message, QuizQuestion, Role, LESSON_FORMAT,
};
pub use comenius_database::{
    establish_connection, establish_pool, LessonRepository, MemoryLessonRepository,
    PgLessonRepository, PgPool,
};
pub use comenius_error::{ComeniusError, ComeniusErrorKind, ComeniusResult};
pub use comenius_generation::{strip_code_fences, GenerationOutcome, GenerationService};
pub use comenius_interface::CompletionDriver;
pub use comenius_loader::{
    load_lesson, render_html, Environment, LessonComponent, Node, RuntimeBindings,
};
pub use comenius_models::OpenAiClient;
pub use comenius_storage::{lesson_key, FileSystemStorage, LessonStorage};
