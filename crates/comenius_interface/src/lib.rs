//! Trait definitions for the Comenius lesson builder.
//!
//! This crate provides the driver seam between the generation service and the
//! concrete LLM backends.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod traits;

pub use traits::CompletionDriver;
