//! Model driver error types.

/// Kinds of errors raised by LLM drivers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ModelsErrorKind {
    /// Request could not be sent
    #[display("Request failed: {}", _0)]
    Http(String),
    /// The API returned a non-success status
    #[display("API error {}: {}", status, message)]
    Api {
        /// HTTP status code returned by the API
        status: u16,
        /// Raw response body
        message: String,
    },
    /// Response body could not be parsed
    #[display("Failed to parse response: {}", _0)]
    Parse(String),
    /// Request conversion failed
    #[display("Conversion error: {}", _0)]
    Conversion(String),
    /// The response contained no usable completion
    #[display("Empty completion: {}", _0)]
    EmptyCompletion(String),
    /// Required API credential is missing
    #[display("Missing credential: {}", _0)]
    MissingCredential(String),
}

/// Model driver error with location tracking.
///
/// # Examples
///
/// ```
/// use comenius_error::{ModelsError, ModelsErrorKind};
///
/// let err = ModelsError::new(ModelsErrorKind::Parse("unexpected EOF".to_string()));
/// assert!(format!("{}", err).contains("parse"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Models Error: {} at line {} in {}", kind, line, file)]
pub struct ModelsError {
    /// The kind of error that occurred
    pub kind: ModelsErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl ModelsError {
    /// Create a new model driver error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ModelsErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
