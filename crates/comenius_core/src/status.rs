//! Lesson lifecycle status.

use serde::{Deserialize, Serialize};

/// Lifecycle states of a lesson record.
///
/// A lesson is created as `Generating`, and the generation service moves it to
/// exactly one of the terminal states. A retry moves a `Failed` lesson back to
/// `Generating`.
///
/// # Examples
///
/// ```
/// use comenius_core::LessonStatus;
///
/// assert!(LessonStatus::Generating.can_transition_to(LessonStatus::Generated));
/// assert!(LessonStatus::Failed.can_transition_to(LessonStatus::Generating));
/// assert!(!LessonStatus::Generated.can_transition_to(LessonStatus::Generating));
///
/// assert_eq!(LessonStatus::Failed.as_str(), "failed");
/// assert_eq!("error".parse::<LessonStatus>().unwrap(), LessonStatus::Failed);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    /// Generation is in flight
    #[display("generating")]
    Generating,
    /// Generation succeeded and a document is stored
    #[display("generated")]
    Generated,
    /// Generation failed; the record carries an error message
    #[display("failed")]
    Failed,
}

impl LessonStatus {
    /// Canonical text label, as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            LessonStatus::Generating => "generating",
            LessonStatus::Generated => "generated",
            LessonStatus::Failed => "failed",
        }
    }

    /// Whether the state machine permits moving to `next`.
    ///
    /// `Generating` may complete either way; only `Failed` may be reset for a
    /// retry. `Generated` is terminal.
    pub fn can_transition_to(&self, next: LessonStatus) -> bool {
        matches!(
            (self, next),
            (LessonStatus::Generating, LessonStatus::Generated)
                | (LessonStatus::Generating, LessonStatus::Failed)
                | (LessonStatus::Failed, LessonStatus::Generating)
        )
    }

    /// Whether the lesson has reached a terminal state.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, LessonStatus::Generating)
    }
}

impl std::str::FromStr for LessonStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generating" => Ok(LessonStatus::Generating),
            "generated" => Ok(LessonStatus::Generated),
            // "error" is the legacy label for the failure state
            "failed" | "error" => Ok(LessonStatus::Failed),
            other => Err(format!("unknown lesson status: {other}")),
        }
    }
}
