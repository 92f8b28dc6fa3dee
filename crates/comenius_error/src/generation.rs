//! Generation service error types.

/// Kinds of lesson generation failures.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// A required input field was missing or blank
    #[display("Missing required field: {}", _0)]
    MissingField(String),
    /// The model returned content that cannot be a lesson document
    #[display("Invalid generated content: {}", _0)]
    InvalidContent(String),
    /// The model call itself failed
    #[display("Model call failed: {}", _0)]
    Model(String),
    /// Neither storage nor the database accepted the generated document
    #[display("Failed to persist generated content: {}", _0)]
    Persistence(String),
    /// The lesson record does not exist
    #[display("Lesson not found: {}", _0)]
    LessonNotFound(String),
    /// The lesson is not in a state that allows this operation
    #[display("Lesson {} is not retryable (status: {})", id, status)]
    NotRetryable {
        /// Lesson identifier
        id: String,
        /// Current status of the lesson
        status: String,
    },
}

/// Generation error with location tracking.
///
/// # Examples
///
/// ```
/// use comenius_error::{GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::MissingField("outline".to_string()));
/// assert!(format!("{}", err).contains("outline"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new generation error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
