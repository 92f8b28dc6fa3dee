//! Shared application state.

use crate::tasks::TaskRegistry;
use comenius_database::LessonRepository;
use comenius_generation::GenerationService;
use comenius_storage::LessonStorage;
use std::sync::Arc;

/// State handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Lesson record repository
    pub repository: Arc<dyn LessonRepository>,
    /// Object store holding generated documents
    pub storage: Arc<dyn LessonStorage>,
    /// The generation pipeline
    pub generation: GenerationService,
    /// Background generation task registry
    pub tasks: TaskRegistry,
}

impl AppState {
    /// Assemble state over the given repository, storage, and generation service.
    pub fn new(
        repository: Arc<dyn LessonRepository>,
        storage: Arc<dyn LessonStorage>,
        generation: GenerationService,
    ) -> Self {
        Self {
            repository,
            storage,
            generation,
            tasks: TaskRegistry::new(),
        }
    }
}
