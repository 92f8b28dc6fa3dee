//! Explicit runtime bindings for interpreted lessons.
//!
//! Lessons never see ambient globals. Everything the interpreter may touch
//! is passed in here: a key/value state store, a logger hook, and a
//! description of the environment the lesson runs in.

use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// Logging hook handed to interpreted lessons.
pub trait LessonLogger: Send + Sync {
    /// Record an event raised while interpreting a lesson.
    fn event(&self, message: &str);
}

/// Default logger that forwards lesson events to `tracing`.
#[derive(Debug, Clone, Default)]
pub struct TracingLogger;

impl LessonLogger for TracingLogger {
    fn event(&self, message: &str) {
        debug!(target: "lesson", "{message}");
    }
}

/// Description of the environment a lesson is interpreted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// The lesson being interpreted
    pub lesson_id: Uuid,
    /// Rendering medium, e.g. `"html"`
    pub medium: &'static str,
}

impl Environment {
    /// Environment for the server-side HTML view path.
    pub fn html(lesson_id: Uuid) -> Self {
        Self {
            lesson_id,
            medium: "html",
        }
    }
}

/// The full set of capabilities an interpreted lesson may use.
pub struct RuntimeBindings {
    state: HashMap<String, Value>,
    selections: HashMap<u32, usize>,
    revealed: HashSet<u32>,
    logger: Arc<dyn LessonLogger>,
    environment: Environment,
}

impl RuntimeBindings {
    /// Fresh bindings with empty state and the default tracing logger.
    pub fn new(environment: Environment) -> Self {
        Self::with_logger(environment, Arc::new(TracingLogger))
    }

    /// Fresh bindings with a caller-supplied logger hook.
    pub fn with_logger(environment: Environment, logger: Arc<dyn LessonLogger>) -> Self {
        Self {
            state: HashMap::new(),
            selections: HashMap::new(),
            revealed: HashSet::new(),
            logger,
            environment,
        }
    }

    /// The environment descriptor.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Read a state key; absent keys read as `Null`.
    pub fn get(&self, key: &str) -> &Value {
        self.state.get(key).unwrap_or(&Value::Null)
    }

    /// Write a state key.
    pub fn set(&mut self, key: &str, value: Value) {
        self.state.insert(key.to_string(), value);
    }

    /// Flip a boolean key; absent keys read as `false`.
    pub fn toggle(&mut self, key: &str) {
        let current = self.get(key).as_bool().unwrap_or(false);
        self.set(key, Value::Bool(!current));
    }

    /// Add to a numeric key; absent keys read as `0`.
    pub fn increment(&mut self, key: &str, by: i64) {
        let current = self.get(key).as_i64().unwrap_or(0);
        self.set(key, Value::from(current + by));
    }

    /// Record the selected option for a quiz question.
    pub fn select(&mut self, question: u32, option: usize) {
        self.selections.insert(question, option);
        self.revealed.remove(&question);
    }

    /// The recorded selection for a quiz question, if any.
    pub fn selection(&self, question: u32) -> Option<usize> {
        self.selections.get(&question).copied()
    }

    /// Mark a quiz question's result as revealed.
    pub fn reveal(&mut self, question: u32) {
        self.revealed.insert(question);
    }

    /// Whether a quiz question's result has been revealed.
    pub fn is_revealed(&self, question: u32) -> bool {
        self.revealed.contains(&question)
    }

    /// Forward an event to the bound logger.
    pub fn log(&self, message: &str) {
        self.logger.event(message);
    }
}

impl std::fmt::Debug for RuntimeBindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeBindings")
            .field("state", &self.state)
            .field("selections", &self.selections)
            .field("revealed", &self.revealed)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings() -> RuntimeBindings {
        RuntimeBindings::new(Environment::html(Uuid::new_v4()))
    }

    #[test]
    fn absent_keys_read_as_null() {
        let b = bindings();
        assert_eq!(b.get("score"), &Value::Null);
    }

    #[test]
    fn toggle_treats_absent_as_false() {
        let mut b = bindings();
        b.toggle("show_hint");
        assert_eq!(b.get("show_hint"), &Value::Bool(true));
        b.toggle("show_hint");
        assert_eq!(b.get("show_hint"), &Value::Bool(false));
    }

    #[test]
    fn increment_treats_absent_as_zero() {
        let mut b = bindings();
        b.increment("score", 3);
        b.increment("score", -1);
        assert_eq!(b.get("score"), &Value::from(2));
    }

    #[test]
    fn reselecting_hides_a_revealed_result() {
        let mut b = bindings();
        b.select(1, 0);
        b.reveal(1);
        assert!(b.is_revealed(1));
        b.select(1, 2);
        assert!(!b.is_revealed(1));
        assert_eq!(b.selection(1), Some(2));
    }
}
