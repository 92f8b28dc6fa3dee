//! The generation service.

use crate::{build_request, strip_code_fences, validate_document};
use comenius_core::{LessonRecord, LessonStatus};
use comenius_error::{ComeniusResult, GenerationError, GenerationErrorKind};
use comenius_database::LessonRepository;
use comenius_interface::CompletionDriver;
use comenius_storage::{lesson_key, LessonStorage};
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Where a successful generation ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// Stored in object storage under this key
    Storage {
        /// The storage key written to the record's `file_path`
        file_path: String,
    },
    /// Stored inline in the database (storage fallback)
    Database,
}

impl GenerationOutcome {
    /// Whether the fallback tier was used.
    pub fn stored_in_database(&self) -> bool {
        matches!(self, GenerationOutcome::Database)
    }
}

/// Orchestrates a single lesson generation attempt.
///
/// One invocation produces exactly one terminal status write on the lesson
/// record: `generated` with a storage pointer or inline content, or `failed`
/// with the failure message. There is no internal retry; a user-initiated
/// [`GenerationService::retry`] is the only re-entry path.
#[derive(Clone)]
pub struct GenerationService {
    driver: Arc<dyn CompletionDriver>,
    repository: Arc<dyn LessonRepository>,
    storage: Arc<dyn LessonStorage>,
}

impl GenerationService {
    /// Create a service over the given driver, repository and storage.
    pub fn new(
        driver: Arc<dyn CompletionDriver>,
        repository: Arc<dyn LessonRepository>,
        storage: Arc<dyn LessonStorage>,
    ) -> Self {
        Self {
            driver,
            repository,
            storage,
        }
    }

    /// Generate a lesson document for `lesson_id` from `outline`.
    ///
    /// Input validation failures return immediately without touching the
    /// record. Any later failure is recorded on the lesson as `failed` before
    /// the error propagates to the caller.
    #[tracing::instrument(skip(self, outline), fields(lesson_id = %lesson_id))]
    pub async fn generate(
        &self,
        lesson_id: Uuid,
        outline: &str,
    ) -> ComeniusResult<GenerationOutcome> {
        if outline.trim().is_empty() {
            return Err(GenerationError::new(GenerationErrorKind::MissingField(
                "outline".to_string(),
            ))
            .into());
        }
        if lesson_id.is_nil() {
            return Err(GenerationError::new(GenerationErrorKind::MissingField(
                "lessonId".to_string(),
            ))
            .into());
        }

        match self.attempt(lesson_id, outline).await {
            Ok(outcome) => {
                info!(lesson_id = %lesson_id, ?outcome, "Lesson generated");
                Ok(outcome)
            }
            Err(e) => {
                error!(lesson_id = %lesson_id, error = %e, "Lesson generation failed");
                // Best effort: a failure to write the failure status must not
                // mask the original error.
                if let Err(status_err) = self.repository.mark_failed(lesson_id, &e.to_string()).await
                {
                    error!(
                        lesson_id = %lesson_id,
                        error = %status_err,
                        "Failed to record lesson failure status"
                    );
                }
                Err(e)
            }
        }
    }

    /// Reset a failed lesson and run a fresh generation with its stored
    /// outline. See [`GenerationService::prepare_retry`] for the error cases.
    #[tracing::instrument(skip(self), fields(lesson_id = %lesson_id))]
    pub async fn retry(&self, lesson_id: Uuid) -> ComeniusResult<GenerationOutcome> {
        let record = self.prepare_retry(lesson_id).await?;
        self.generate(lesson_id, &record.outline).await
    }

    /// Validate that a lesson is retryable and reset it to `generating`.
    ///
    /// Returns the reset record so callers can re-run generation with the
    /// stored outline, synchronously or as a background task.
    ///
    /// # Errors
    ///
    /// Fails with [`GenerationErrorKind::LessonNotFound`] when the lesson does
    /// not exist and [`GenerationErrorKind::NotRetryable`] when it is not in a
    /// retryable state. The reset itself re-checks the status inside the
    /// mutation, so a racing writer still cannot reset a non-failed lesson.
    pub async fn prepare_retry(&self, lesson_id: Uuid) -> ComeniusResult<LessonRecord> {
        let current = self
            .repository
            .get_lesson(lesson_id)
            .await?
            .ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::LessonNotFound(lesson_id.to_string()))
            })?;
        if !current.status.can_transition_to(LessonStatus::Generating) {
            return Err(GenerationError::new(GenerationErrorKind::NotRetryable {
                id: lesson_id.to_string(),
                status: current.status.to_string(),
            })
            .into());
        }

        let record = self.repository.reset_for_retry(lesson_id).await?;
        debug!(lesson_id = %lesson_id, "Lesson reset for retry");
        Ok(record)
    }

    async fn attempt(&self, lesson_id: Uuid, outline: &str) -> ComeniusResult<GenerationOutcome> {
        let request = build_request(outline, None);
        debug!(model = %self.driver.model_name(), "Requesting lesson completion");

        let response = self
            .driver
            .generate(&request)
            .await
            .map_err(|e| GenerationError::new(GenerationErrorKind::Model(e.to_string())))?;

        let document = strip_code_fences(&response.text);
        debug!(preview = %document.chars().take(120).collect::<String>(), "Cleaned completion");

        validate_document(&document)?;

        let key = lesson_key(lesson_id);
        match self.storage.store(&key, &document).await {
            Ok(()) => {
                self.repository.mark_generated_file(lesson_id, &key).await?;
                Ok(GenerationOutcome::Storage { file_path: key })
            }
            Err(storage_err) => {
                warn!(
                    lesson_id = %lesson_id,
                    error = %storage_err,
                    "Storage upload failed, using database fallback"
                );
                self.repository
                    .mark_generated_content(lesson_id, &document)
                    .await
                    .map_err(|e| {
                        GenerationError::new(GenerationErrorKind::Persistence(format!(
                            "storage: {storage_err}; database: {e}"
                        )))
                    })?;
                Ok(GenerationOutcome::Database)
            }
        }
    }
}
