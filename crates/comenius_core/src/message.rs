//! Message types for the model conversation.

use crate::Role;
use serde::{Deserialize, Serialize};

/// A single text message in a conversation.
///
/// # Examples
///
/// ```
/// use comenius_core::{Message, Role};
///
/// let message = Message {
///     role: Role::User,
///     content: "Hello!".to_string(),
/// };
///
/// assert_eq!(message.role, Role::User);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// The role of the message sender
    pub role: Role,
    /// The text content of the message
    pub content: String,
}

impl Message {
    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
