//! The declarative lesson document schema.
//!
//! Generated lessons are not arbitrary code. The model is asked for a JSON
//! document in the `lesson/v1` format: a component tree plus event bindings.
//! The loader interprets the tree against an explicit runtime, which removes
//! the need for any ad-hoc sandboxing of model output.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format marker every lesson document must declare.
pub const LESSON_FORMAT: &str = "lesson/v1";

/// A complete lesson document.
///
/// # Examples
///
/// ```
/// use comenius_core::{LessonDoc, LESSON_FORMAT};
///
/// let json = r#"{
///     "format": "lesson/v1",
///     "title": "Addition",
///     "root": { "type": "paragraph", "text": "2 + 2 = 4" }
/// }"#;
/// let doc: LessonDoc = serde_json::from_str(json).unwrap();
/// assert_eq!(doc.format, LESSON_FORMAT);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonDoc {
    /// Format version tag, must be [`LESSON_FORMAT`]
    pub format: String,
    /// Lesson title shown above the rendered content
    pub title: String,
    /// The single root component of the lesson
    pub root: Component,
}

/// A node in the lesson component tree.
///
/// Unknown `type` tags fail deserialization, which is the schema-level
/// equivalent of rejecting source that declares constructs the runtime does
/// not provide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Component {
    /// A heading, levels 1-6
    Heading {
        /// Heading level; values outside 1-6 are clamped at render time
        #[serde(default = "default_heading_level")]
        level: u8,
        /// Heading text
        text: String,
    },
    /// A paragraph of body text
    Paragraph {
        /// Paragraph text
        text: String,
    },
    /// A titled grouping of child components
    Section {
        /// Optional section title
        #[serde(default)]
        title: Option<String>,
        /// Child components rendered in order
        children: Vec<Component>,
    },
    /// An ordered or unordered list
    List {
        /// Render as an ordered list
        #[serde(default)]
        ordered: bool,
        /// List items
        items: Vec<String>,
    },
    /// A button bound to an event action
    Button {
        /// Button label
        label: String,
        /// Action dispatched on press
        on_press: Action,
    },
    /// Children shown only when a state key matches
    Conditional {
        /// State key to test
        when: String,
        /// Expected value; defaults to boolean `true`
        #[serde(default = "default_condition_value")]
        equals: Value,
        /// Components shown when the condition holds
        children: Vec<Component>,
    },
    /// An interactive quiz with answer checking
    Quiz {
        /// Quiz questions
        questions: Vec<QuizQuestion>,
    },
}

fn default_heading_level() -> u8 {
    1
}

fn default_condition_value() -> Value {
    Value::Bool(true)
}

/// A single quiz question with its options and correct answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question identifier, unique within the quiz
    pub id: u32,
    /// Question prompt
    pub prompt: String,
    /// Answer options
    pub options: Vec<String>,
    /// Index into `options` of the correct answer
    pub answer: usize,
    /// Optional feedback shown after checking
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Event bindings a component may dispatch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    /// Set a state key to a value
    Set {
        /// State key
        key: String,
        /// New value
        value: Value,
    },
    /// Flip a boolean state key (absent keys read as `false`)
    Toggle {
        /// State key
        key: String,
    },
    /// Add to a numeric state key (absent keys read as `0`)
    Increment {
        /// State key
        key: String,
        /// Amount to add
        #[serde(default = "default_increment")]
        by: i64,
    },
    /// Record the selected option for a quiz question
    SelectAnswer {
        /// Question identifier
        question: u32,
        /// Selected option index
        option: usize,
    },
    /// Reveal the checked result for a quiz question
    RevealResult {
        /// Question identifier
        question: u32,
    },
}

fn default_increment() -> i64 {
    1
}

impl LessonDoc {
    /// Whether the document declares the supported format version.
    pub fn is_supported_format(&self) -> bool {
        self.format == LESSON_FORMAT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_quiz_document() {
        let json = r#"{
            "format": "lesson/v1",
            "title": "Addition quiz",
            "root": {
                "type": "section",
                "title": "Quiz",
                "children": [
                    { "type": "heading", "level": 2, "text": "Warm up" },
                    {
                        "type": "quiz",
                        "questions": [
                            {
                                "id": 1,
                                "prompt": "What is 2 + 3?",
                                "options": ["4", "5", "6"],
                                "answer": 1
                            }
                        ]
                    }
                ]
            }
        }"#;

        let doc: LessonDoc = serde_json::from_str(json).unwrap();
        assert!(doc.is_supported_format());
        match &doc.root {
            Component::Section { children, .. } => assert_eq!(children.len(), 2),
            other => panic!("expected section, got {other:?}"),
        }
    }

    #[test]
    fn unknown_component_kind_is_rejected() {
        let json = r#"{ "type": "script", "src": "alert(1)" }"#;
        assert!(serde_json::from_str::<Component>(json).is_err());
    }

    #[test]
    fn heading_level_defaults_to_one() {
        let c: Component = serde_json::from_str(r#"{ "type": "heading", "text": "Hi" }"#).unwrap();
        match c {
            Component::Heading { level, .. } => assert_eq!(level, 1),
            other => panic!("expected heading, got {other:?}"),
        }
    }

    #[test]
    fn increment_defaults_to_one() {
        let a: Action =
            serde_json::from_str(r#"{ "action": "increment", "key": "score" }"#).unwrap();
        match a {
            Action::Increment { by, .. } => assert_eq!(by, 1),
            other => panic!("expected increment, got {other:?}"),
        }
    }

    #[test]
    fn actions_round_trip() {
        let a = Action::SelectAnswer {
            question: 1,
            option: 2,
        };
        let json = serde_json::to_string(&a).unwrap();
        let back: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(a, back);
    }
}
