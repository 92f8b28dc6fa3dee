//! Dynamic lesson loading and interpretation.
//!
//! A stored lesson is a `lesson/v1` JSON document. This crate resolves the
//! document text (object storage first, inline database column as fallback),
//! parses it into the typed component tree, and instantiates an interpreted
//! [`LessonComponent`] against an explicit set of [`RuntimeBindings`]. The
//! component renders to a plain node tree and applies event actions to the
//! bound state; an HTML renderer covers the server view path.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod bindings;
mod component;
mod html;
mod loader;
mod parse;
mod resolve;

pub use bindings::{Environment, LessonLogger, RuntimeBindings, TracingLogger};
pub use component::{LessonComponent, Node};
pub use html::render_html;
pub use loader::load_lesson;
pub use parse::parse_document;
pub use resolve::resolve_source;
