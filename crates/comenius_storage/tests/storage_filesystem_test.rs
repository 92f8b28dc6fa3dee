//! Tests for the filesystem storage backend.

use comenius_storage::{lesson_key, FileSystemStorage, LessonStorage};
use tempfile::TempDir;
use uuid::Uuid;

#[tokio::test]
async fn test_store_and_retrieve() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(temp_dir.path()).unwrap();

    let key = lesson_key(Uuid::new_v4());
    let text = r#"{"format":"lesson/v1","title":"T","root":{"type":"paragraph","text":"hi"}}"#;

    storage.store(&key, text).await.unwrap();
    let retrieved = storage.retrieve(&key).await.unwrap();
    assert_eq!(retrieved, text);
}

#[tokio::test]
async fn test_store_is_an_upsert() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(temp_dir.path()).unwrap();

    let key = lesson_key(Uuid::new_v4());
    storage.store(&key, "first").await.unwrap();
    storage.store(&key, "second").await.unwrap();

    assert_eq!(storage.retrieve(&key).await.unwrap(), "second");
}

#[tokio::test]
async fn test_retrieve_missing_key_is_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(temp_dir.path()).unwrap();

    let result = storage.retrieve(&lesson_key(Uuid::new_v4())).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_exists_and_delete() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(temp_dir.path()).unwrap();

    let key = lesson_key(Uuid::new_v4());
    assert!(!storage.exists(&key).await.unwrap());

    storage.store(&key, "doc").await.unwrap();
    assert!(storage.exists(&key).await.unwrap());

    storage.delete(&key).await.unwrap();
    assert!(!storage.exists(&key).await.unwrap());

    // Deleting again is fine
    storage.delete(&key).await.unwrap();
}

#[tokio::test]
async fn test_traversal_keys_are_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FileSystemStorage::new(temp_dir.path()).unwrap();

    assert!(storage.store("../outside.json", "x").await.is_err());
    assert!(storage.store("/etc/passwd", "x").await.is_err());
    assert!(storage.retrieve("").await.is_err());
}

#[test]
fn test_lesson_key_format() {
    let id = Uuid::new_v4();
    let key = lesson_key(id);
    assert_eq!(key, format!("lessons/lesson-{id}.json"));
}
