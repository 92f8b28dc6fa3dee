//! Top-level error wrapper types.

use crate::{GenerationError, LoaderError, ModelsError, ServerError, StorageError};
#[cfg(feature = "database")]
use crate::DatabaseError;

/// This is the foundation error enum. Each Comenius crate contributes the
/// variant covering its concern.
///
/// # Examples
///
/// ```
/// use comenius_error::{ComeniusError, StorageError, StorageErrorKind};
///
/// let storage_err = StorageError::new(StorageErrorKind::Unavailable("s3".to_string()));
/// let err: ComeniusError = storage_err.into();
/// assert!(format!("{}", err).contains("unavailable"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum ComeniusErrorKind {
    /// LLM driver error
    #[from(ModelsError)]
    Models(ModelsError),
    /// Object storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Database error
    #[cfg(feature = "database")]
    #[from(DatabaseError)]
    Database(DatabaseError),
    /// Generation service error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Dynamic loader error
    #[from(LoaderError)]
    Loader(LoaderError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Comenius error with kind discrimination.
///
/// # Examples
///
/// ```
/// use comenius_error::{ComeniusResult, ServerError, ServerErrorKind};
///
/// fn might_fail() -> ComeniusResult<()> {
///     Err(ServerError::new(ServerErrorKind::Configuration(
///         "DATABASE_URL not set".to_string(),
///     )))?
/// }
///
/// match might_fail() {
///     Ok(_) => println!("Success"),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Comenius Error: {}", _0)]
pub struct ComeniusError(Box<ComeniusErrorKind>);

impl ComeniusError {
    /// Create a new error from a kind.
    pub fn new(kind: ComeniusErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &ComeniusErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to ComeniusErrorKind
impl<T> From<T> for ComeniusError
where
    T: Into<ComeniusErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Comenius operations.
///
/// # Examples
///
/// ```
/// use comenius_error::{ComeniusResult, LoaderError, LoaderErrorKind};
///
/// fn load_document() -> ComeniusResult<String> {
///     Err(LoaderError::new(LoaderErrorKind::NoContent(
///         "no stored source".to_string(),
///     )))?
/// }
/// ```
pub type ComeniusResult<T> = std::result::Result<T, ComeniusError>;
