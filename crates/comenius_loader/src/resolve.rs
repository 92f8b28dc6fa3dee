//! Source text resolution for stored lessons.

use comenius_core::{LessonRecord, LessonStatus};
use comenius_error::{ComeniusResult, LoaderError, LoaderErrorKind};
use comenius_storage::LessonStorage;
use tracing::{debug, instrument, warn};

/// Resolve the document text for a lesson record.
///
/// Only `Generated` lessons carry a document. The object-storage pointer is
/// tried first; a failed download falls back to the inline `content` column
/// so a storage outage does not take finished lessons offline. A record with
/// neither source is an error.
#[instrument(skip(record, storage), fields(lesson_id = %record.id))]
pub async fn resolve_source(
    record: &LessonRecord,
    storage: &dyn LessonStorage,
) -> ComeniusResult<String> {
    if record.status != LessonStatus::Generated {
        return Err(LoaderError::new(LoaderErrorKind::NotRenderable(
            record.status.as_str().to_string(),
        ))
        .into());
    }

    if let Some(key) = &record.file_path {
        match storage.retrieve(key).await {
            Ok(text) => {
                debug!(key = %key, "Resolved lesson document from storage");
                return Ok(text);
            }
            Err(e) => {
                warn!(key = %key, error = %e, "Storage download failed, trying inline content");
            }
        }
    }

    if let Some(content) = &record.content {
        debug!("Resolved lesson document from inline content");
        return Ok(content.clone());
    }

    Err(LoaderError::new(LoaderErrorKind::NoContent(record.id.to_string())).into())
}
