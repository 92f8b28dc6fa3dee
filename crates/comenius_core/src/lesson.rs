//! The lesson record, the sole persistent entity.

use crate::LessonStatus;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum title length before the outline summary is truncated.
const TITLE_MAX_CHARS: usize = 100;

/// A lesson as stored in the content store.
///
/// Exactly one of `file_path` and `content` is the active source once the
/// lesson is `Generated`; `content` is the fallback when the object-storage
/// write failed. `error` is populated iff `status` is `Failed`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonRecord {
    /// Opaque unique key
    pub id: Uuid,
    /// Human label, truncated summary of the outline
    pub title: String,
    /// Original free-text request
    pub outline: String,
    /// Lifecycle status
    pub status: LessonStatus,
    /// Object-storage key of the generated document, if stored externally
    pub file_path: Option<String>,
    /// Inline generated document, if the storage write fell back
    pub content: Option<String>,
    /// Failure message for `Failed` lessons
    pub error: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

/// Derive a display title from an outline.
///
/// Long outlines are truncated to 100 characters with an ellipsis suffix.
///
/// # Examples
///
/// ```
/// use comenius_core::derive_title;
///
/// assert_eq!(derive_title("Fractions 101"), "Fractions 101");
/// let long = "x".repeat(150);
/// assert_eq!(derive_title(&long).chars().count(), 103);
/// ```
pub fn derive_title(outline: &str) -> String {
    let outline = outline.trim();
    if outline.chars().count() > TITLE_MAX_CHARS {
        let truncated: String = outline.chars().take(TITLE_MAX_CHARS).collect();
        format!("{truncated}...")
    } else {
        outline.to_string()
    }
}
