//! OpenAI chat-completions data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A chat message on the OpenAI wire format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatMessage {
    /// Message role ("system", "user" or "assistant")
    role: String,
    /// Message content
    content: String,
}

impl ChatMessage {
    /// Creates a new builder for `ChatMessage`.
    pub fn builder() -> ChatMessageBuilder {
        ChatMessageBuilder::default()
    }
}

/// Chat-completions request parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ChatCompletionRequest {
    /// Model identifier
    model: String,
    /// Conversation messages
    messages: Vec<ChatMessage>,
    /// Temperature for sampling
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    /// Maximum tokens to generate
    #[builder(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl ChatCompletionRequest {
    /// Creates a new builder for `ChatCompletionRequest`.
    pub fn builder() -> ChatCompletionRequestBuilder {
        ChatCompletionRequestBuilder::default()
    }
}

/// A single completion choice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters)]
pub struct ChatChoice {
    /// The assistant message for this choice
    message: ChatMessage,
    /// Why the model stopped, when reported
    #[serde(default)]
    finish_reason: Option<String>,
}

/// Chat-completions response body.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct ChatCompletionResponse {
    /// Response identifier
    id: String,
    /// Completion choices; the first is the one used
    choices: Vec<ChatChoice>,
}

impl ChatCompletionResponse {
    /// Text of the first choice, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.choices
            .first()
            .map(|choice| choice.message().content().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_without_absent_options() {
        let request = ChatCompletionRequest::builder()
            .model("gpt-4o")
            .messages(vec![ChatMessage::builder()
                .role("user")
                .content("hi")
                .build()
                .unwrap()])
            .build()
            .unwrap();

        let json = serde_json::to_string(&request).unwrap();
        assert!(!json.contains("temperature"));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn response_first_text() {
        let json = r#"{
            "id": "chatcmpl-1",
            "choices": [
                {
                    "message": { "role": "assistant", "content": "hello" },
                    "finish_reason": "stop"
                }
            ]
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text(), Some("hello"));
    }

    #[test]
    fn empty_choices_yield_no_text() {
        let json = r#"{ "id": "chatcmpl-2", "choices": [] }"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.first_text(), None);
    }
}
