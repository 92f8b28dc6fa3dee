//! Core data types for the Comenius lesson builder.
//!
//! This crate provides the foundation data types used across all Comenius
//! interfaces: conversation messages for the model call, the lesson record and
//! its status state machine, and the declarative lesson document schema that
//! generated lessons are expressed in.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod document;
mod lesson;
mod message;
mod request;
mod role;
mod status;

pub use document::{Action, Component, LessonDoc, QuizQuestion, LESSON_FORMAT};
pub use lesson::{derive_title, LessonRecord};
pub use message::Message;
pub use request::{GenerateRequest, GenerateResponse};
pub use role::Role;
pub use status::LessonStatus;
