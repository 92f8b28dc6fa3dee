//! Lesson generation service.
//!
//! Takes a user outline, asks the model for a `lesson/v1` document, cleans and
//! validates the raw completion, and persists the result: object storage
//! first, the database `content` column as the fallback tier. Every attempt
//! ends with exactly one terminal status write on the lesson record.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod extraction;
mod prompt;
mod service;
mod validation;

pub use extraction::strip_code_fences;
pub use prompt::{build_request, GENERATION_MAX_TOKENS, GENERATION_TEMPERATURE};
pub use service::{GenerationOutcome, GenerationService};
pub use validation::{validate_document, MIN_DOCUMENT_CHARS};
