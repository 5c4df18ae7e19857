//! Text-generation backend abstraction and the Anthropic Messages client.

use std::time::Duration;

use async_trait::async_trait;
use contentai_core::AppConfig;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::GenerationError;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// One prompt sent to a generation backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}

/// Anything that turns a prompt into text.
///
/// The pipeline runner only sees this trait, so tests drive it with a
/// scripted backend instead of the network.
#[async_trait]
pub trait GenerationBackend: Send + Sync {
    /// Model identifier, for logging.
    fn model(&self) -> &str;

    /// # Errors
    ///
    /// Returns a [`GenerationError`] when the backend cannot produce text.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

#[derive(Debug, Clone)]
pub struct AnthropicConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl AnthropicConfig {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            api_key: config.anthropic_api_key.clone(),
            model: config.model.clone(),
            timeout_secs: config.generation_timeout_secs,
            user_agent: config.user_agent.clone(),
        }
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Client for the Anthropic Messages API.
pub struct AnthropicBackend {
    client: Client,
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl AnthropicBackend {
    /// # Errors
    ///
    /// Returns [`GenerationError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: &AnthropicConfig) -> Result<Self, GenerationError> {
        Self::with_base_url(config, DEFAULT_BASE_URL)
    }

    /// # Errors
    ///
    /// Returns [`GenerationError::Transport`] if the HTTP client cannot be built.
    pub fn with_base_url(config: &AnthropicConfig, base_url: &str) -> Result<Self, GenerationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .build()?;

        if config.api_key.is_none() {
            tracing::warn!("ANTHROPIC_API_KEY not set; every generation step will fail");
        }

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: format!("{}/v1/messages", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl GenerationBackend for AnthropicBackend {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::Auth("ANTHROPIC_API_KEY not set".to_string()))?;

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            system: &request.system,
            messages: [Message {
                role: "user",
                content: &request.prompt,
            }],
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, &text));
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&text).map_err(|e| GenerationError::Parse(e.to_string()))?;

        let output: String = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect();

        if output.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }
        Ok(output)
    }
}

fn status_error(status: StatusCode, body: &str) -> GenerationError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.pointer("/error/message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    match status.as_u16() {
        401 | 403 => GenerationError::Auth(message),
        429 => GenerationError::RateLimited,
        // Includes 529, the "overloaded" status.
        code @ 500..=599 => GenerationError::Unavailable(code),
        code => GenerationError::Api {
            status: code,
            message,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping() {
        let body = r#"{"type":"error","error":{"type":"authentication_error","message":"invalid x-api-key"}}"#;
        assert!(matches!(
            status_error(StatusCode::UNAUTHORIZED, body),
            GenerationError::Auth(ref m) if m == "invalid x-api-key"
        ));
        assert!(status_error(StatusCode::FORBIDDEN, "").is_auth());
        assert!(matches!(
            status_error(StatusCode::TOO_MANY_REQUESTS, ""),
            GenerationError::RateLimited
        ));
        let overloaded = StatusCode::from_u16(529).unwrap();
        assert!(matches!(
            status_error(overloaded, ""),
            GenerationError::Unavailable(529)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_GATEWAY, ""),
            GenerationError::Unavailable(502)
        ));
        assert!(matches!(
            status_error(StatusCode::BAD_REQUEST, "not json"),
            GenerationError::Api { status: 400, ref message } if message == "HTTP 400"
        ));
    }
}
