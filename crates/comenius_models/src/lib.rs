//! LLM provider drivers for the Comenius lesson builder.
//!
//! Currently one backend is implemented: the OpenAI chat-completions API,
//! which is the provider the lesson generation prompt contract targets.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod openai;

pub use openai::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, ChatMessage, OpenAiClient,
};
