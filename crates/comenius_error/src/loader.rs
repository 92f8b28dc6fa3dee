//! Dynamic loader error types.

/// Kinds of lesson loading failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum LoaderErrorKind {
    /// No source text could be resolved for the lesson
    #[display("No lesson content available: {}", _0)]
    NoContent(String),
    /// The resolved text lacks the required format marker
    #[display("Missing format marker: {}", _0)]
    MissingMarker(String),
    /// The document failed to parse into the component tree
    #[display("Document parse error: {}", _0)]
    Parse(String),
    /// The document declares no usable root component
    #[display("Invalid root component: {}", _0)]
    InvalidRoot(String),
    /// Interpretation of the component tree failed
    #[display("Interpretation error: {}", _0)]
    Interpretation(String),
    /// The lesson is not in a renderable state
    #[display("Lesson not renderable (status: {})", _0)]
    NotRenderable(String),
}

/// Loader error with location tracking.
///
/// # Examples
///
/// ```
/// use comenius_error::{LoaderError, LoaderErrorKind};
///
/// let err = LoaderError::new(LoaderErrorKind::Parse("unexpected token".to_string()));
/// assert!(format!("{}", err).contains("parse"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Loader Error: {} at line {} in {}", kind, line, file)]
pub struct LoaderError {
    /// The kind of error that occurred
    pub kind: LoaderErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl LoaderError {
    /// Create a new loader error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: LoaderErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
