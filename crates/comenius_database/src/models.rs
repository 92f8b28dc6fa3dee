//! Row models for the `lessons` table.

use chrono::{DateTime, Utc};
use comenius_core::{LessonRecord, LessonStatus};
use comenius_error::{DatabaseError, DatabaseErrorKind};
use diesel::prelude::*;
use uuid::Uuid;

/// A lesson row as read from the database.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = crate::schema::lessons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct LessonRow {
    /// Primary key
    pub id: Uuid,
    /// Truncated outline summary
    pub title: String,
    /// Original user outline
    pub outline: String,
    /// Lifecycle status label
    pub status: String,
    /// Object-storage key of the generated document
    pub file_path: Option<String>,
    /// Inline generated document (storage fallback)
    pub content: Option<String>,
    /// Failure message
    pub error: Option<String>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

/// Insertable row for new lessons.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = crate::schema::lessons)]
pub struct NewLessonRow {
    /// Primary key
    pub id: Uuid,
    /// Truncated outline summary
    pub title: String,
    /// Original user outline
    pub outline: String,
    /// Lifecycle status label
    pub status: String,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<LessonRow> for LessonRecord {
    type Error = DatabaseError;

    fn try_from(row: LessonRow) -> Result<Self, Self::Error> {
        let status: LessonStatus = row
            .status
            .parse()
            .map_err(|e: String| DatabaseError::new(DatabaseErrorKind::Serialization(e)))?;

        Ok(LessonRecord {
            id: row.id,
            title: row.title,
            outline: row.outline,
            status,
            file_path: row.file_path,
            content: row.content,
            error: row.error,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str) -> LessonRow {
        LessonRow {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            outline: "o".to_string(),
            status: status.to_string(),
            file_path: None,
            content: None,
            error: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_record() {
        let record = LessonRecord::try_from(row("generating")).unwrap();
        assert_eq!(record.status, LessonStatus::Generating);
    }

    #[test]
    fn legacy_error_status_converts() {
        let record = LessonRecord::try_from(row("error")).unwrap();
        assert_eq!(record.status, LessonStatus::Failed);
    }

    #[test]
    fn garbage_status_is_a_serialization_error() {
        assert!(LessonRecord::try_from(row("what")).is_err());
    }
}
