//! The full load pipeline, from stored record to live component.

use crate::bindings::RuntimeBindings;
use crate::component::LessonComponent;
use crate::parse::parse_document;
use crate::resolve::resolve_source;
use comenius_core::LessonRecord;
use comenius_error::ComeniusResult;
use comenius_storage::LessonStorage;
use tracing::{debug, instrument};

/// Load a stored lesson into a live, dispatchable component.
///
/// Resolves the document text, enforces the format marker, parses the
/// component tree, and instantiates it against the given bindings. Callers
/// are expected to treat any error here as "content unavailable" and keep
/// the raw message out of user-facing output.
#[instrument(skip_all, fields(lesson_id = %record.id))]
pub async fn load_lesson(
    record: &LessonRecord,
    storage: &dyn LessonStorage,
    bindings: RuntimeBindings,
) -> ComeniusResult<LessonComponent> {
    let text = resolve_source(record, storage).await?;
    let doc = parse_document(&text)?;
    let component = LessonComponent::instantiate(doc, bindings)?;
    debug!(title = %component.title(), "Lesson loaded");
    Ok(component)
}
