use crate::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use async_trait::async_trait;
use comenius_core::{GenerateRequest, GenerateResponse, Role};
use comenius_error::{ComeniusResult, ModelsError, ModelsErrorKind};
use comenius_interface::CompletionDriver;
use reqwest::Client;
use tracing::{debug, error, instrument};

const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// OpenAI chat-completions client.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl OpenAiClient {
    /// Creates a new OpenAI client with an explicit API key.
    ///
    /// # Arguments
    ///
    /// * `api_key` - OpenAI API key
    /// * `model` - Model identifier (e.g., "gpt-4o")
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let api_key = api_key.into();
        let model = model.into();
        debug!("Creating new OpenAI client");
        Self {
            client: Client::new(),
            api_key,
            model,
        }
    }

    /// Creates a new OpenAI client reading the key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    #[instrument(skip_all, fields(model = %model))]
    pub fn from_env(model: impl Into<String> + std::fmt::Display) -> Result<Self, ModelsError> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            ModelsError::new(ModelsErrorKind::MissingCredential(
                "OPENAI_API_KEY not set".to_string(),
            ))
        })?;
        Ok(Self::new(api_key, model.into()))
    }

    /// Sends a request to the OpenAI API.
    #[instrument(skip(self, request), fields(model = %request.model()))]
    pub async fn generate_openai(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, ModelsError> {
        debug!("Sending request to OpenAI API");

        let response = self
            .client
            .post(OPENAI_API_URL)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Failed to send request to OpenAI API");
                ModelsError::new(ModelsErrorKind::Http(format!("Request failed: {}", e)))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "OpenAI API returned error");
            return Err(ModelsError::new(ModelsErrorKind::Api {
                status: status.as_u16(),
                message: body,
            }));
        }

        let completion: ChatCompletionResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse OpenAI response");
            ModelsError::new(ModelsErrorKind::Parse(format!(
                "Failed to parse response: {}",
                e
            )))
        })?;

        debug!(response_id = %completion.id(), "Received response from OpenAI");
        Ok(completion)
    }

    /// Converts a Comenius GenerateRequest to an OpenAI API request.
    fn convert_request(&self, request: &GenerateRequest) -> Result<ChatCompletionRequest, ModelsError> {
        let messages: Result<Vec<ChatMessage>, ModelsError> = request
            .messages
            .iter()
            .map(|msg| {
                let role = match msg.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                };
                ChatMessage::builder()
                    .role(role)
                    .content(msg.content.clone())
                    .build()
                    .map_err(|e| ModelsError::new(ModelsErrorKind::Conversion(e.to_string())))
            })
            .collect();

        let messages = messages?;
        if messages.is_empty() {
            return Err(ModelsError::new(ModelsErrorKind::Conversion(
                "Request must contain at least one message".to_string(),
            )));
        }

        let mut builder = ChatCompletionRequest::builder();
        builder.model(request.model.clone().unwrap_or_else(|| self.model.clone()));
        builder.messages(messages);

        if let Some(temp) = request.temperature {
            builder.temperature(temp);
        }
        if let Some(max_tokens) = request.max_tokens {
            builder.max_tokens(max_tokens);
        }

        builder
            .build()
            .map_err(|e| ModelsError::new(ModelsErrorKind::Conversion(e.to_string())))
    }

    /// Converts an OpenAI API response to a Comenius GenerateResponse.
    fn convert_response(response: &ChatCompletionResponse) -> Result<GenerateResponse, ModelsError> {
        let text = response.first_text().ok_or_else(|| {
            ModelsError::new(ModelsErrorKind::EmptyCompletion(
                "Response contained no choices".to_string(),
            ))
        })?;

        Ok(GenerateResponse {
            text: text.to_string(),
        })
    }
}

#[async_trait]
impl CompletionDriver for OpenAiClient {
    #[instrument(skip(self, request), fields(provider = "openai", model = %self.model))]
    async fn generate(&self, request: &GenerateRequest) -> ComeniusResult<GenerateResponse> {
        debug!("Generating completion with OpenAI");

        let openai_request = self.convert_request(request)?;
        let openai_response = self.generate_openai(&openai_request).await?;
        let response = Self::convert_response(&openai_response)?;

        Ok(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comenius_core::Message;

    #[test]
    fn convert_request_uses_default_model() {
        let client = OpenAiClient::new("test-key", "gpt-4o");
        let request = GenerateRequest {
            messages: vec![Message::user("hello")],
            max_tokens: Some(128),
            temperature: Some(0.7),
            model: None,
        };

        let converted = client.convert_request(&request).unwrap();
        assert_eq!(converted.model(), "gpt-4o");
        assert_eq!(converted.messages().len(), 1);
        assert_eq!(*converted.max_tokens(), Some(128));
    }

    #[test]
    fn convert_request_leaves_sampling_params_unset() {
        let client = OpenAiClient::new("test-key", "gpt-4o");
        let request = GenerateRequest {
            messages: vec![Message::user("hello")],
            max_tokens: None,
            temperature: None,
            model: Some("gpt-4o-mini".to_string()),
        };

        let converted = client.convert_request(&request).unwrap();
        assert_eq!(converted.model(), "gpt-4o-mini");
        assert_eq!(*converted.temperature(), None);
        assert_eq!(*converted.max_tokens(), None);
    }

    #[test]
    fn convert_request_rejects_empty_messages() {
        let client = OpenAiClient::new("test-key", "gpt-4o");
        let request = GenerateRequest::default();
        assert!(client.convert_request(&request).is_err());
    }

    #[test]
    fn convert_response_requires_a_choice() {
        let json = r#"{ "id": "chatcmpl-3", "choices": [] }"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(OpenAiClient::convert_response(&response).is_err());
    }
}
