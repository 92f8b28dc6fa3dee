//! PostgreSQL integration for the Comenius lesson builder.
//!
//! The `lessons` table is the content store: one row per lesson, carrying the
//! outline, lifecycle status, and either an object-storage pointer or the
//! inline generated document. Repositories follow a trait + backend pattern;
//! `MemoryLessonRepository` is the in-process backend used by tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod connection;
mod lesson_repository;
mod memory;
mod models;
pub mod schema;

pub use connection::{establish_connection, establish_pool, PgPool};
pub use lesson_repository::{LessonRepository, PgLessonRepository};
pub use memory::MemoryLessonRepository;
pub use models::{LessonRow, NewLessonRow};
