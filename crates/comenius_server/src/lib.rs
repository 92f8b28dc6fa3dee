//! HTTP surface of the Comenius lesson builder.
//!
//! Wires the generation pipeline, lesson repository, object storage, and
//! dynamic loader behind an axum router: lesson submission with tracked
//! background generation, synchronous generation, record retrieval, retry,
//! and a server-rendered lesson view.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod config;
mod state;
mod tasks;
mod view;

pub use api::create_router;
pub use config::AppConfig;
pub use state::AppState;
pub use tasks::TaskRegistry;
