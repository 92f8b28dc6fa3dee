//! Filesystem-based lesson storage implementation.

use crate::LessonStorage;
use comenius_error::{ComeniusResult, StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};

/// Filesystem storage backend.
///
/// Stores lesson documents under `{base_path}/{key}`, creating intermediate
/// directories as needed:
///
/// ```text
/// /var/comenius/store/
/// └── lessons/
///     ├── lesson-7c9e6679-7425-40de-944b-e07fc1f90ae7.json
///     └── lesson-16fd2706-8baf-433b-82eb-8c7fada847da.json
/// ```
///
/// Writes go through a temp file plus rename so a concurrent reader never
/// observes a half-written document.
pub struct FileSystemStorage {
    base_path: PathBuf,
}

impl FileSystemStorage {
    /// Create a new filesystem storage backend.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created or accessed.
    #[tracing::instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>) -> ComeniusResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                base_path.display(),
                e
            )))
        })?;

        tracing::info!(path = %base_path.display(), "Created filesystem storage");
        Ok(Self { base_path })
    }

    /// Resolve a storage key to a path under the base directory.
    ///
    /// Keys are relative slash-separated paths; absolute keys and parent
    /// traversal are rejected.
    fn resolve(&self, key: &str) -> Result<PathBuf, StorageError> {
        let relative = Path::new(key);
        if key.is_empty()
            || relative.is_absolute()
            || relative
                .components()
                .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            return Err(StorageError::new(StorageErrorKind::InvalidKey(
                key.to_string(),
            )));
        }
        Ok(self.base_path.join(relative))
    }
}

#[async_trait::async_trait]
impl LessonStorage for FileSystemStorage {
    #[tracing::instrument(skip(self, text), fields(key = %key, size = text.len()))]
    async fn store(&self, key: &str, text: &str) -> ComeniusResult<()> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        // Temp file + rename keeps the upsert atomic
        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, text).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            StorageError::new(StorageErrorKind::FileWrite(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        tracing::debug!(path = %path.display(), "Stored lesson document");
        Ok(())
    }

    #[tracing::instrument(skip(self), fields(key = %key))]
    async fn retrieve(&self, key: &str) -> ComeniusResult<String> {
        let path = self.resolve(key)?;

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::new(StorageErrorKind::NotFound(key.to_string())).into())
            }
            Err(e) => Err(StorageError::new(StorageErrorKind::FileRead(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }

    async fn exists(&self, key: &str) -> ComeniusResult<bool> {
        let path = self.resolve(key)?;
        Ok(tokio::fs::try_exists(&path).await.unwrap_or(false))
    }

    #[tracing::instrument(skip(self), fields(key = %key))]
    async fn delete(&self, key: &str) -> ComeniusResult<()> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "{}: {}",
                path.display(),
                e
            )))
            .into()),
        }
    }
}
