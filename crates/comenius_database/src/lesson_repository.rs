//! Repository for lesson records.

use crate::{LessonRow, NewLessonRow, PgPool};
use async_trait::async_trait;
use chrono::Utc;
use comenius_core::{derive_title, LessonRecord, LessonStatus};
use comenius_error::{ComeniusResult, DatabaseError, DatabaseErrorKind};
use diesel::prelude::*;
use uuid::Uuid;

/// Repository trait for lesson record operations.
///
/// Mutations mirror the lesson lifecycle: a record is created as
/// `generating`, completed exactly once per attempt by one of the `mark_*`
/// methods, and optionally reset by `reset_for_retry`. The completion writes
/// are deliberately last-writer-wins; only the retry reset checks the state
/// machine, because it is user-initiated.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Create a lesson with status `generating` and a title derived from the
    /// outline.
    async fn create_lesson(&self, outline: &str) -> ComeniusResult<LessonRecord>;

    /// Fetch a lesson by primary key.
    async fn get_lesson(&self, id: Uuid) -> ComeniusResult<Option<LessonRecord>>;

    /// List lessons ordered by creation time, newest first.
    async fn list_lessons(&self, limit: i64) -> ComeniusResult<Vec<LessonRecord>>;

    /// Record a successful generation stored in object storage.
    ///
    /// Sets `file_path` and clears `content`, so exactly one source is
    /// active.
    async fn mark_generated_file(&self, id: Uuid, file_path: &str) -> ComeniusResult<LessonRecord>;

    /// Record a successful generation stored inline (storage fallback).
    ///
    /// Sets `content` and clears `file_path`.
    async fn mark_generated_content(&self, id: Uuid, document: &str)
        -> ComeniusResult<LessonRecord>;

    /// Record a failed generation with its message.
    async fn mark_failed(&self, id: Uuid, message: &str) -> ComeniusResult<LessonRecord>;

    /// Reset a failed lesson to `generating` and clear its error.
    ///
    /// # Errors
    ///
    /// Returns an invalid-transition error when the lesson is not `failed`.
    async fn reset_for_retry(&self, id: Uuid) -> ComeniusResult<LessonRecord>;
}

/// PostgreSQL implementation of [`LessonRepository`].
///
/// Holds an r2d2 pool; diesel calls run on the blocking thread pool.
#[derive(Clone)]
pub struct PgLessonRepository {
    pool: PgPool,
}

impl PgLessonRepository {
    /// Create a new repository over a connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run<T, F>(&self, op: F) -> ComeniusResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> Result<T, DatabaseError> + Send + 'static,
    {
        let pool = self.pool.clone();
        let result = tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| DatabaseError::new(DatabaseErrorKind::Connection(e.to_string())))?;
            op(&mut conn)
        })
        .await
        .map_err(|e| DatabaseError::new(DatabaseErrorKind::Query(format!("task join: {e}"))))?;

        Ok(result?)
    }
}

#[async_trait]
impl LessonRepository for PgLessonRepository {
    #[tracing::instrument(skip(self, outline))]
    async fn create_lesson(&self, outline: &str) -> ComeniusResult<LessonRecord> {
        let new_row = NewLessonRow {
            id: Uuid::new_v4(),
            title: derive_title(outline),
            outline: outline.trim().to_string(),
            status: LessonStatus::Generating.as_str().to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        self.run(move |conn| {
            use crate::schema::lessons;

            let row: LessonRow = diesel::insert_into(lessons::table)
                .values(&new_row)
                .get_result(conn)
                .map_err(DatabaseError::from)?;
            row.try_into()
        })
        .await
    }

    async fn get_lesson(&self, id: Uuid) -> ComeniusResult<Option<LessonRecord>> {
        self.run(move |conn| {
            use crate::schema::lessons::dsl;

            let row: Option<LessonRow> = dsl::lessons
                .filter(dsl::id.eq(id))
                .first(conn)
                .optional()
                .map_err(DatabaseError::from)?;
            row.map(LessonRecord::try_from).transpose()
        })
        .await
    }

    async fn list_lessons(&self, limit: i64) -> ComeniusResult<Vec<LessonRecord>> {
        self.run(move |conn| {
            use crate::schema::lessons::dsl;

            let rows: Vec<LessonRow> = dsl::lessons
                .order(dsl::created_at.desc())
                .limit(limit)
                .load(conn)
                .map_err(DatabaseError::from)?;
            rows.into_iter().map(LessonRecord::try_from).collect()
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn mark_generated_file(&self, id: Uuid, file_path: &str) -> ComeniusResult<LessonRecord> {
        let file_path = file_path.to_string();
        self.run(move |conn| {
            use crate::schema::lessons::dsl;

            let row: LessonRow = diesel::update(dsl::lessons.filter(dsl::id.eq(id)))
                .set((
                    dsl::status.eq(LessonStatus::Generated.as_str()),
                    dsl::file_path.eq(Some(file_path)),
                    dsl::content.eq(None::<String>),
                    dsl::error.eq(None::<String>),
                    dsl::updated_at.eq(Utc::now()),
                ))
                .get_result(conn)
                .map_err(DatabaseError::from)?;
            row.try_into()
        })
        .await
    }

    #[tracing::instrument(skip(self, document))]
    async fn mark_generated_content(
        &self,
        id: Uuid,
        document: &str,
    ) -> ComeniusResult<LessonRecord> {
        let document = document.to_string();
        self.run(move |conn| {
            use crate::schema::lessons::dsl;

            let row: LessonRow = diesel::update(dsl::lessons.filter(dsl::id.eq(id)))
                .set((
                    dsl::status.eq(LessonStatus::Generated.as_str()),
                    dsl::content.eq(Some(document)),
                    dsl::file_path.eq(None::<String>),
                    dsl::error.eq(None::<String>),
                    dsl::updated_at.eq(Utc::now()),
                ))
                .get_result(conn)
                .map_err(DatabaseError::from)?;
            row.try_into()
        })
        .await
    }

    #[tracing::instrument(skip(self, message))]
    async fn mark_failed(&self, id: Uuid, message: &str) -> ComeniusResult<LessonRecord> {
        let message = message.to_string();
        self.run(move |conn| {
            use crate::schema::lessons::dsl;

            let row: LessonRow = diesel::update(dsl::lessons.filter(dsl::id.eq(id)))
                .set((
                    dsl::status.eq(LessonStatus::Failed.as_str()),
                    dsl::error.eq(Some(message)),
                    dsl::updated_at.eq(Utc::now()),
                ))
                .get_result(conn)
                .map_err(DatabaseError::from)?;
            row.try_into()
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn reset_for_retry(&self, id: Uuid) -> ComeniusResult<LessonRecord> {
        self.run(move |conn| {
            use crate::schema::lessons::dsl;

            conn.transaction(|conn| {
                let row: Option<LessonRow> = dsl::lessons
                    .filter(dsl::id.eq(id))
                    .first(conn)
                    .optional()
                    .map_err(DatabaseError::from)?;

                let row = row.ok_or_else(|| {
                    DatabaseError::new(DatabaseErrorKind::NotFound)
                })?;
                let current: LessonRecord = row.try_into()?;

                if !current.status.can_transition_to(LessonStatus::Generating) {
                    return Err(DatabaseError::new(DatabaseErrorKind::InvalidTransition(
                        format!("cannot retry lesson in status {}", current.status),
                    )));
                }

                let row: LessonRow = diesel::update(dsl::lessons.filter(dsl::id.eq(id)))
                    .set((
                        dsl::status.eq(LessonStatus::Generating.as_str()),
                        dsl::error.eq(None::<String>),
                        dsl::updated_at.eq(Utc::now()),
                    ))
                    .get_result(conn)
                    .map_err(DatabaseError::from)?;
                row.try_into()
            })
        })
        .await
    }
}
