//! Trait definitions for LLM backends.

use async_trait::async_trait;
use comenius_core::{GenerateRequest, GenerateResponse};
use comenius_error::ComeniusResult;

/// Core trait that all LLM backends must implement.
///
/// This provides the minimal interface for synchronous text generation. The
/// generation service is written against this seam so tests can substitute a
/// scripted double for the real API client.
#[async_trait]
pub trait CompletionDriver: Send + Sync {
    /// Generate a completion for the given request.
    async fn generate(&self, req: &GenerateRequest) -> ComeniusResult<GenerateResponse>;

    /// Provider name (e.g., "openai").
    fn provider_name(&self) -> &'static str;

    /// Model identifier (e.g., "gpt-4o").
    fn model_name(&self) -> &str;
}
