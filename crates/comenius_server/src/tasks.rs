//! Tracked handoff of background generation work.
//!
//! Generation is handed to the runtime through a registry rather than a bare
//! spawn, so the enqueue result is observable and a lesson cannot have two
//! live generation tasks at once.

use comenius_error::{ComeniusResult, ServerError, ServerErrorKind};
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

/// Registry of in-flight generation tasks, keyed by lesson id.
#[derive(Clone, Default)]
pub struct TaskRegistry {
    tasks: Arc<Mutex<HashMap<Uuid, JoinHandle<()>>>>,
}

impl TaskRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand a generation task to the runtime.
    ///
    /// Fails when the lesson already has a live task. Finished handles are
    /// pruned on every call.
    pub fn spawn<F>(&self, lesson_id: Uuid, task: F) -> ComeniusResult<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut tasks = self.lock()?;
        tasks.retain(|_, handle| !handle.is_finished());
        if tasks.contains_key(&lesson_id) {
            return Err(ServerError::new(ServerErrorKind::TaskHandoff(format!(
                "lesson {lesson_id} already has a generation task in flight"
            )))
            .into());
        }
        debug!(lesson_id = %lesson_id, "Generation task enqueued");
        tasks.insert(lesson_id, tokio::spawn(task));
        Ok(())
    }

    /// Number of live tasks.
    pub fn active(&self) -> usize {
        match self.lock() {
            Ok(tasks) => tasks.values().filter(|h| !h.is_finished()).count(),
            Err(_) => 0,
        }
    }

    /// Wait for a lesson's task to finish, if one is registered.
    pub async fn join(&self, lesson_id: Uuid) -> ComeniusResult<()> {
        let handle = self.lock()?.remove(&lesson_id);
        if let Some(handle) = handle {
            handle.await.map_err(|e| {
                ServerError::new(ServerErrorKind::TaskHandoff(format!(
                    "generation task for lesson {lesson_id} panicked: {e}"
                )))
            })?;
        }
        Ok(())
    }

    fn lock(&self) -> ComeniusResult<std::sync::MutexGuard<'_, HashMap<Uuid, JoinHandle<()>>>> {
        self.tasks.lock().map_err(|_| {
            ServerError::new(ServerErrorKind::TaskHandoff(
                "task registry lock poisoned".to_string(),
            ))
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn spawned_tasks_run_and_can_be_joined() {
        let registry = TaskRegistry::new();
        let (tx, rx) = oneshot::channel();
        let id = Uuid::new_v4();

        registry
            .spawn(id, async move {
                let _ = tx.send(42);
            })
            .unwrap();
        registry.join(id).await.unwrap();
        assert_eq!(rx.await.unwrap(), 42);
    }

    #[tokio::test]
    async fn a_lesson_cannot_have_two_live_tasks() {
        let registry = TaskRegistry::new();
        let id = Uuid::new_v4();

        registry
            .spawn(id, async {
                tokio::time::sleep(Duration::from_secs(30)).await;
            })
            .unwrap();
        assert!(registry.spawn(id, async {}).is_err());
        assert_eq!(registry.active(), 1);
    }

    #[tokio::test]
    async fn finished_tasks_are_pruned_on_spawn() {
        let registry = TaskRegistry::new();
        let id = Uuid::new_v4();

        registry.spawn(id, async {}).unwrap();
        registry.join(id).await.unwrap();

        // The slot is free again once the first task completed.
        registry.spawn(id, async {}).unwrap();
        registry.join(id).await.unwrap();
    }

    #[tokio::test]
    async fn joining_an_unknown_lesson_is_a_no_op() {
        let registry = TaskRegistry::new();
        registry.join(Uuid::new_v4()).await.unwrap();
    }
}
