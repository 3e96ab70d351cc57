use async_trait::async_trait;
use parking_lot::Mutex;
use remedy_rs_llm::{CompletionRequest, CompletionResponse, ModelClient, ModelError};
use std::sync::Arc;

/// Model double that always answers with the same text.
#[derive(Debug, Clone)]
pub struct FixedModel {
    response: String,
}

impl FixedModel {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait]
impl ModelClient for FixedModel {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, ModelError> {
        Ok(CompletionResponse {
            text: self.response.clone(),
        })
    }
}

/// Model double that records every prompt it receives.
#[derive(Debug, Clone)]
pub struct RecordingModel {
    response: String,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl RecordingModel {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Prompts seen so far, in call order.
    pub fn seen_prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl ModelClient for RecordingModel {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ModelError> {
        self.prompts.lock().push(request.prompt);
        Ok(CompletionResponse {
            text: self.response.clone(),
        })
    }
}

/// Model double that always fails with an API error.
#[derive(Debug, Clone)]
pub struct FailingModel {
    message: String,
}

impl FailingModel {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl ModelClient for FailingModel {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, ModelError> {
        Err(ModelError::Api {
            status: 500,
            message: self.message.clone(),
        })
    }
}
