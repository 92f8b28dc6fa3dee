//! Storage trait definition.

use comenius_error::ComeniusResult;
use uuid::Uuid;

/// Trait for pluggable lesson document storage backends.
///
/// Implementations handle the storage and retrieval of generated document
/// text, while the lesson record itself lives in the database.
#[async_trait::async_trait]
pub trait LessonStorage: Send + Sync {
    /// Store document text under a key. Writes are upserts: storing to an
    /// existing key replaces its content.
    ///
    /// # Arguments
    ///
    /// * `key` - Storage key, e.g. `lessons/lesson-<id>.json`
    /// * `text` - The document text to store
    async fn store(&self, key: &str, text: &str) -> ComeniusResult<()>;

    /// Retrieve document text by key.
    ///
    /// # Errors
    ///
    /// Returns a not-found error when no document is stored under the key.
    async fn retrieve(&self, key: &str) -> ComeniusResult<String>;

    /// Check whether a document exists under the key.
    async fn exists(&self, key: &str) -> ComeniusResult<bool>;

    /// Delete the document under the key. Deleting a missing key is not an
    /// error.
    async fn delete(&self, key: &str) -> ComeniusResult<()>;
}

/// Deterministic storage key for a lesson document.
///
/// # Examples
///
/// ```
/// use comenius_storage::lesson_key;
/// use uuid::Uuid;
///
/// let id = Uuid::nil();
/// assert_eq!(
///     lesson_key(id),
///     "lessons/lesson-00000000-0000-0000-0000-000000000000.json"
/// );
/// ```
pub fn lesson_key(id: Uuid) -> String {
    format!("lessons/lesson-{id}.json")
}
