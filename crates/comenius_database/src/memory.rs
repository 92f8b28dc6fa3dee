//! In-memory lesson repository.

use crate::LessonRepository;
use async_trait::async_trait;
use chrono::Utc;
use comenius_core::{derive_title, LessonRecord, LessonStatus};
use comenius_error::{ComeniusResult, DatabaseError, DatabaseErrorKind};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory implementation of [`LessonRepository`].
///
/// Backs the repository trait with a `HashMap`, preserving the same lifecycle
/// semantics as the Postgres backend. Used by the service and loader tests,
/// which exercise the state machine without a database.
#[derive(Clone, Default)]
pub struct MemoryLessonRepository {
    lessons: Arc<RwLock<HashMap<Uuid, LessonRecord>>>,
}

impl MemoryLessonRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record directly, bypassing the creation flow. Test seam.
    pub async fn insert(&self, record: LessonRecord) {
        self.lessons.write().await.insert(record.id, record);
    }

    async fn update<F>(&self, id: Uuid, apply: F) -> ComeniusResult<LessonRecord>
    where
        F: FnOnce(&mut LessonRecord) -> Result<(), DatabaseError>,
    {
        let mut lessons = self.lessons.write().await;
        let record = lessons
            .get_mut(&id)
            .ok_or_else(|| DatabaseError::new(DatabaseErrorKind::NotFound))?;
        apply(record)?;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }
}

#[async_trait]
impl LessonRepository for MemoryLessonRepository {
    async fn create_lesson(&self, outline: &str) -> ComeniusResult<LessonRecord> {
        let record = LessonRecord {
            id: Uuid::new_v4(),
            title: derive_title(outline),
            outline: outline.trim().to_string(),
            status: LessonStatus::Generating,
            file_path: None,
            content: None,
            error: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.lessons.write().await.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_lesson(&self, id: Uuid) -> ComeniusResult<Option<LessonRecord>> {
        Ok(self.lessons.read().await.get(&id).cloned())
    }

    async fn list_lessons(&self, limit: i64) -> ComeniusResult<Vec<LessonRecord>> {
        let mut records: Vec<LessonRecord> = self.lessons.read().await.values().cloned().collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit.max(0) as usize);
        Ok(records)
    }

    async fn mark_generated_file(&self, id: Uuid, file_path: &str) -> ComeniusResult<LessonRecord> {
        let file_path = file_path.to_string();
        self.update(id, move |record| {
            record.status = LessonStatus::Generated;
            record.file_path = Some(file_path);
            record.content = None;
            record.error = None;
            Ok(())
        })
        .await
    }

    async fn mark_generated_content(
        &self,
        id: Uuid,
        document: &str,
    ) -> ComeniusResult<LessonRecord> {
        let document = document.to_string();
        self.update(id, move |record| {
            record.status = LessonStatus::Generated;
            record.content = Some(document);
            record.file_path = None;
            record.error = None;
            Ok(())
        })
        .await
    }

    async fn mark_failed(&self, id: Uuid, message: &str) -> ComeniusResult<LessonRecord> {
        let message = message.to_string();
        self.update(id, move |record| {
            record.status = LessonStatus::Failed;
            record.error = Some(message);
            Ok(())
        })
        .await
    }

    async fn reset_for_retry(&self, id: Uuid) -> ComeniusResult<LessonRecord> {
        self.update(id, |record| {
            if !record.status.can_transition_to(LessonStatus::Generating) {
                return Err(DatabaseError::new(DatabaseErrorKind::InvalidTransition(
                    format!("cannot retry lesson in status {}", record.status),
                )));
            }
            record.status = LessonStatus::Generating;
            record.error = None;
            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn creation_starts_generating() {
        let repo = MemoryLessonRepository::new();
        let record = repo.create_lesson("A 3 question quiz on addition").await.unwrap();
        assert_eq!(record.status, LessonStatus::Generating);
        assert!(record.error.is_none());

        let fetched = repo.get_lesson(record.id).await.unwrap().unwrap();
        assert_eq!(fetched, record);
    }

    #[tokio::test]
    async fn generated_file_clears_inline_content() {
        let repo = MemoryLessonRepository::new();
        let record = repo.create_lesson("counting").await.unwrap();

        repo.mark_generated_content(record.id, "{}").await.unwrap();
        let updated = repo
            .mark_generated_file(record.id, "lessons/lesson-x.json")
            .await
            .unwrap();

        assert_eq!(updated.status, LessonStatus::Generated);
        assert_eq!(updated.file_path.as_deref(), Some("lessons/lesson-x.json"));
        assert!(updated.content.is_none());
    }

    #[tokio::test]
    async fn retry_requires_a_failed_lesson() {
        let repo = MemoryLessonRepository::new();
        let record = repo.create_lesson("counting").await.unwrap();

        assert!(repo.reset_for_retry(record.id).await.is_err());

        repo.mark_failed(record.id, "model exploded").await.unwrap();
        let reset = repo.reset_for_retry(record.id).await.unwrap();
        assert_eq!(reset.status, LessonStatus::Generating);
        assert!(reset.error.is_none());
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let repo = MemoryLessonRepository::new();
        let first = repo.create_lesson("one").await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let second = repo.create_lesson("two").await.unwrap();

        let listed = repo.list_lessons(10).await.unwrap();
        assert_eq!(listed[0].id, second.id);
        assert_eq!(listed[1].id, first.id);
    }
}
