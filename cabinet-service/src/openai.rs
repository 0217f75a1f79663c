//! Chat-completion gateway for an OpenAI-compatible backend.
//!
//! Both recipe suggestion and object detection go through [`ChatBackend`].
//! The credential is injected through [`OpenAiConfig`]; a missing credential
//! fails before any request is built.

#[cfg(test)]
pub mod fake;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::OpenAiConfig;
use crate::error::{BackendError, ServiceError, ServiceResult};

/// A backend able to answer a single chat-completion request
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send the request and return the text of the first choice
    async fn complete(&self, request: CompletionRequest) -> ServiceResult<String>;

    /// Whether a credential is available
    fn is_configured(&self) -> bool;
}

/// OpenAI API client
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiClient {
    /// Create a new client; the credential is only checked when a request is made
    pub fn new(config: OpenAiConfig) -> ServiceResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| {
                ServiceError::Backend(BackendError::Connection {
                    url: config.base_url.clone(),
                    source: e,
                })
            })?;

        Ok(Self { client, config })
    }
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> ServiceResult<String> {
        let api_key = self
            .config
            .credential()
            .ok_or_else(ServiceError::missing_credential)?;

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        debug!(model = %request.model, max_tokens = request.max_tokens, "Calling chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Connection {
                url: url.clone(),
                source: e,
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            error!(status, body = %body, "AI backend returned an error");
            return Err(BackendError::Status { status, body }.into());
        }

        let completion: ChatCompletionResponse =
            response
                .json()
                .await
                .map_err(|e| BackendError::InvalidResponse {
                    message: e.to_string(),
                })?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                BackendError::InvalidResponse {
                    message: "completion contained no message content".to_string(),
                }
                .into()
            })
    }

    fn is_configured(&self) -> bool {
        self.config.credential().is_some()
    }
}

/// Chat-completion request body
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<CompletionMessage>,
    pub max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// A message sent to the backend
#[derive(Debug, Clone, Serialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: MessageContent,
}

impl CompletionMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: MessageContent::Text(content.into()),
        }
    }

    /// A user message carrying an instruction and one image for vision models
    pub fn user_with_image(text: impl Into<String>, image_url: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: MessageContent::Parts(vec![
                ContentPart::Text { text: text.into() },
                ContentPart::ImageUrl {
                    image_url: ImageUrl {
                        url: image_url.into(),
                    },
                },
            ]),
        }
    }

    /// Concatenated text parts, ignoring images
    #[cfg(test)]
    pub fn text(&self) -> String {
        match &self.content {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => parts
                .iter()
                .filter_map(|part| match part {
                    ContentPart::Text { text } => Some(text.as_str()),
                    ContentPart::ImageUrl { .. } => None,
                })
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }
}

/// Plain text or multimodal content
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize)]
pub struct ImageUrl {
    pub url: String,
}

// Internal OpenAI API types

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
