//! Error types for the Comenius lesson builder.
//!
//! This crate provides the foundation error types used throughout the Comenius
//! workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern for clean error
//! handling:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use comenius_error::{ComeniusResult, StorageError, StorageErrorKind};
//!
//! fn fetch_document() -> ComeniusResult<String> {
//!     Err(StorageError::new(StorageErrorKind::NotFound(
//!         "lessons/lesson-1.json".to_string(),
//!     )))?
//! }
//!
//! match fetch_document() {
//!     Ok(text) => println!("Got: {}", text),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "database")]
mod database;
mod error;
mod generation;
mod loader;
mod models;
mod server;
mod storage;

#[cfg(feature = "database")]
pub use database::{DatabaseError, DatabaseErrorKind};
pub use error::{ComeniusError, ComeniusErrorKind, ComeniusResult};
pub use generation::{GenerationError, GenerationErrorKind};
pub use loader::{LoaderError, LoaderErrorKind};
pub use models::{ModelsError, ModelsErrorKind};
pub use server::{ServerError, ServerErrorKind};
pub use storage::{StorageError, StorageErrorKind};
