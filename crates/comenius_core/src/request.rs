//! Request and response types for LLM generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Generic generation request.
///
/// # Examples
///
/// ```
/// use comenius_core::{GenerateRequest, Message, Role};
///
/// let request = GenerateRequest {
///     messages: vec![Message {
///         role: Role::User,
///         content: "Hello!".to_string(),
///     }],
///     max_tokens: Some(100),
///     temperature: Some(0.7),
///     model: Some("gpt-4o".to_string()),
/// };
///
/// assert_eq!(request.messages.len(), 1);
/// assert_eq!(request.max_tokens, Some(100));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GenerateRequest {
    /// The conversation messages to send
    pub messages: Vec<Message>,
    /// Maximum number of tokens to generate
    pub max_tokens: Option<u32>,
    /// Sampling temperature (0.0 to 1.0)
    pub temperature: Option<f32>,
    /// Model identifier to use
    pub model: Option<String>,
}

/// The unified response object.
///
/// # Examples
///
/// ```
/// use comenius_core::GenerateResponse;
///
/// let response = GenerateResponse {
///     text: "Hello! How can I help?".to_string(),
/// };
///
/// assert!(!response.text.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The generated completion text
    pub text: String,
}
