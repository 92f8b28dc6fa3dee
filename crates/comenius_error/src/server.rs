//! Error types for the HTTP server.

/// Error kinds for server operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum ServerErrorKind {
    /// Request validation failed: {0}
    #[display("Invalid request: {}", _0)]
    InvalidRequest(String),

    /// Requested resource does not exist: {0}
    #[display("Not found: {}", _0)]
    NotFound(String),

    /// Request conflicts with the current resource state: {0}
    #[display("Conflict: {}", _0)]
    Conflict(String),

    /// Failed to hand a generation task to the runtime: {0}
    #[display("Task handoff failed: {}", _0)]
    TaskHandoff(String),

    /// Configuration error: {0}
    #[display("Configuration error: {}", _0)]
    Configuration(String),

    /// Failed to bind or serve: {0}
    #[display("Serve error: {}", _0)]
    Serve(String),
}

/// Error wrapper with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Server Error: {} at line {} in {}", kind, line, file)]
pub struct ServerError {
    /// The error kind
    pub kind: ServerErrorKind,
    /// Line number where error occurred
    pub line: u32,
    /// File where error occurred
    pub file: &'static str,
}

impl ServerError {
    /// Create a new ServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
