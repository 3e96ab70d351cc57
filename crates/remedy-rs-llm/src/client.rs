//! Model client trait and the Anthropic Messages API implementation.

use crate::error::ModelError;
use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

/// Model used when the caller does not configure one.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";
/// Token budget used when the caller does not configure one.
pub const DEFAULT_MAX_TOKENS: u32 = 1500;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One completion request: a fully assembled prompt and a token budget.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// Prompt text, already assembled by the caller.
    pub prompt: String,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl CompletionRequest {
    /// Build a request with the default token budget.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Override the token budget.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Text returned by the model.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResponse {
    /// Generated text.
    pub text: String,
}

/// A hosted model behind a request/response boundary.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Send a prompt and return the generated text.
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ModelError>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<MessageBody<'a>>,
}

#[derive(Debug, Serialize)]
struct MessageBody<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicModel {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl AnthropicModel {
    /// Build a client for the hosted API with the default model.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ModelError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ModelError::MissingApiKey);
        }
        info!("building anthropic model client (model={DEFAULT_MODEL})");
        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Override the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Override the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl ModelClient for AnthropicModel {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ModelError> {
        let url = format!("{}/v1/messages", self.base_url);
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            messages: vec![MessageBody {
                role: "user",
                content: &request.prompt,
            }],
        };
        debug!(
            "sending completion (model={}, prompt_len={}, max_tokens={})",
            self.model,
            request.prompt.len(),
            request.max_tokens
        );
        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let parsed: MessagesResponse = response.json().await?;
        let text = parsed
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");
        if text.trim().is_empty() {
            return Err(ModelError::EmptyResponse);
        }
        Ok(CompletionResponse { text })
    }
}

#[cfg(test)]
mod tests {
    use super::{AnthropicModel, CompletionRequest, DEFAULT_MAX_TOKENS, MessagesResponse};
    use crate::error::ModelError;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_api_key_is_rejected() {
        assert!(matches!(
            AnthropicModel::new("  "),
            Err(ModelError::MissingApiKey)
        ));
    }

    #[test]
    fn request_defaults_and_overrides() {
        let request = CompletionRequest::new("describe fever care");
        assert_eq!(request.max_tokens, DEFAULT_MAX_TOKENS);
        let request = request.with_max_tokens(256);
        assert_eq!(request.max_tokens, 256);
    }

    #[test]
    fn response_text_blocks_are_collected() {
        let body = r#"{"content":[{"type":"text","text":"first"},{"type":"text","text":"second"}]}"#;
        let parsed: MessagesResponse = serde_json::from_str(body).expect("deserialize");
        let text = parsed
            .content
            .iter()
            .filter_map(|block| block.text.as_deref())
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(text, "first\nsecond");
    }
}
