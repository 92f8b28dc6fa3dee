//! Object storage for generated lesson documents.
//!
//! Generated lessons are stored under deterministic keys of the form
//! `lessons/lesson-<id>.json`. The storage trait is pluggable; the shipped
//! backend writes to the local filesystem. When a store fails, the generation
//! service falls back to persisting the document inline in the database.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod storage;

pub use filesystem::FileSystemStorage;
pub use storage::{lesson_key, LessonStorage};
