//! Document parsing with a hard format gate.

use comenius_core::{LessonDoc, LESSON_FORMAT};
use comenius_error::{ComeniusResult, LoaderError, LoaderErrorKind};

/// Parse resolved text into a typed lesson document.
///
/// The raw text must contain the `lesson/v1` marker before any parsing is
/// attempted, and the parsed document must declare it as its format. Unknown
/// component kinds fail deserialization, so a document that reaches the
/// caller contains only constructs the interpreter provides.
pub fn parse_document(text: &str) -> ComeniusResult<LessonDoc> {
    if !text.contains(LESSON_FORMAT) {
        return Err(LoaderError::new(LoaderErrorKind::MissingMarker(format!(
            "expected {LESSON_FORMAT}"
        )))
        .into());
    }

    let doc: LessonDoc = serde_json::from_str(text)
        .map_err(|e| LoaderError::new(LoaderErrorKind::Parse(e.to_string())))?;

    if !doc.is_supported_format() {
        return Err(LoaderError::new(LoaderErrorKind::MissingMarker(format!(
            "document declares {:?}, expected {LESSON_FORMAT}",
            doc.format
        )))
        .into());
    }

    Ok(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use comenius_core::Component;

    #[test]
    fn parses_a_minimal_document() {
        let doc = parse_document(
            r#"{
                "format": "lesson/v1",
                "title": "Hello",
                "root": { "type": "paragraph", "text": "hi" }
            }"#,
        )
        .unwrap();
        assert_eq!(doc.title, "Hello");
        assert!(matches!(doc.root, Component::Paragraph { .. }));
    }

    #[test]
    fn rejects_text_without_the_format_marker() {
        let err = parse_document(r#"{ "title": "x" }"#).unwrap_err();
        assert!(format!("{err}").contains("marker"));
    }

    #[test]
    fn rejects_a_mismatched_declared_format() {
        // Marker present in the text but the field declares another version.
        let err = parse_document(
            r#"{
                "format": "lesson/v2",
                "title": "note: migrated from lesson/v1",
                "root": { "type": "paragraph", "text": "hi" }
            }"#,
        )
        .unwrap_err();
        assert!(format!("{err}").contains("lesson/v2"));
    }

    #[test]
    fn rejects_unknown_component_kinds() {
        let err = parse_document(
            r#"{
                "format": "lesson/v1",
                "title": "Hello",
                "root": { "type": "iframe", "src": "https://example.com" }
            }"#,
        )
        .unwrap_err();
        assert!(format!("{err}").contains("parse"));
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(parse_document("lesson/v1 {not json").is_err());
    }
}
