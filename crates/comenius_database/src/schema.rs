//! Diesel table definitions.

diesel::table! {
    /// Lesson records: one row per submitted outline.
    lessons (id) {
        /// Primary key
        id -> Uuid,
        /// Truncated outline summary
        title -> Text,
        /// Original user outline
        outline -> Text,
        /// Lifecycle status label
        status -> Text,
        /// Object-storage key of the generated document
        file_path -> Nullable<Text>,
        /// Inline generated document (storage fallback)
        content -> Nullable<Text>,
        /// Failure message for failed lessons
        error -> Nullable<Text>,
        /// Creation timestamp
        created_at -> Timestamptz,
        /// Last mutation timestamp
        updated_at -> Timestamptz,
    }
}
