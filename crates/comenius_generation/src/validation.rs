//! Heuristic validation of generated lesson content.
//!
//! The policy is lenient: marker checks are advisory (logged, never surfaced
//! to the user) and only structural impossibility is fatal. The loader
//! re-checks the format marker strictly at render time, so a lenient pass here
//! costs at most one stored-but-unrenderable lesson, while a strict pass would
//! discard salvageable output.

use comenius_core::LESSON_FORMAT;
use comenius_error::{GenerationError, GenerationErrorKind};
use tracing::warn;

/// Minimum plausible length of a lesson document.
pub const MIN_DOCUMENT_CHARS: usize = 32;

/// Validate cleaned model output before persisting it.
///
/// Hard failures: the text is shorter than [`MIN_DOCUMENT_CHARS`], or it
/// contains neither `{` nor `[` and so cannot be a JSON document at all.
/// Missing markers (format tag, root component, title) are warnings only.
///
/// # Examples
///
/// ```
/// use comenius_generation::validate_document;
///
/// let doc = r#"{"format":"lesson/v1","title":"T","root":{"type":"paragraph","text":"hi"}}"#;
/// assert!(validate_document(doc).is_ok());
/// assert!(validate_document("nope").is_err());
/// ```
pub fn validate_document(text: &str) -> Result<(), GenerationError> {
    if text.chars().count() < MIN_DOCUMENT_CHARS {
        return Err(GenerationError::new(GenerationErrorKind::InvalidContent(
            format!(
                "generated content is implausibly short ({} chars)",
                text.chars().count()
            ),
        )));
    }

    if !text.contains('{') && !text.contains('[') {
        return Err(GenerationError::new(GenerationErrorKind::InvalidContent(
            "generated content is not structured as a document".to_string(),
        )));
    }

    if !text.contains(LESSON_FORMAT) {
        warn!(marker = LESSON_FORMAT, "Generated content missing format marker");
    }
    if !text.contains("\"root\"") {
        warn!("Generated content missing root component declaration");
    }
    if !text.contains("\"title\"") {
        warn!("Generated content missing title");
    }

    Ok(())
}
