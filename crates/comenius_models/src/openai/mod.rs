//! OpenAI chat-completions driver.

mod client;
mod dto;

pub use client::OpenAiClient;
pub use dto::{ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
