//! AI client trait and the Claude (Anthropic) implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

use super::config::{AiConfig, AiProvider, ConfigError};
use super::fake::FakeAiClient;
use super::types::{ChatRequest, ChatResponse, ChatRole, Usage};

/// Max tokens requested when the caller does not specify one. The messages
/// API requires an explicit limit.
const DEFAULT_MAX_TOKENS: u32 = 1024;

/// Error type for AI operations.
#[derive(Debug, Error)]
pub enum AiError {
    #[error("API request failed: {0}")]
    Request(String),

    #[error("API returned error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Failed to parse response: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Trait for AI clients.
///
/// Implementations should be stateless and thread-safe. The `prompt_name`
/// identifies which template produced the request; it is used for logging
/// and call accounting, never to alter the request.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Send one request and return the model's text response.
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError>;
}

/// Build the client the configuration asks for.
pub fn client_from_config(config: &AiConfig) -> Result<Arc<dyn AiClient>, AiError> {
    match config.provider {
        AiProvider::Fake => Ok(Arc::new(FakeAiClient::with_recipe_responses())),
        AiProvider::Claude => {
            let api_key = config.api_key.clone().ok_or_else(|| {
                ConfigError::MissingEnvVar("ANTHROPIC_API_KEY".to_string())
            })?;
            Ok(Arc::new(ClaudeClient::new(api_key, config.clone())))
        }
    }
}

/// Client for the Anthropic messages API.
pub struct ClaudeClient {
    api_key: String,
    config: AiConfig,
    client: reqwest::Client,
    last_request: Arc<Mutex<Option<Instant>>>,
}

impl ClaudeClient {
    /// Create a new client with the given API key and configuration.
    pub fn new(api_key: String, config: AiConfig) -> Self {
        Self {
            api_key,
            config,
            client: reqwest::Client::new(),
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    /// Space requests at least `rate_limit_ms` apart.
    async fn rate_limit(&self) {
        if self.config.rate_limit_ms == 0 {
            return;
        }

        let mut last = self.last_request.lock().await;

        if let Some(last_time) = *last {
            let elapsed = last_time.elapsed();
            let min_interval = Duration::from_millis(self.config.rate_limit_ms);

            if elapsed < min_interval {
                tokio::time::sleep(min_interval - elapsed).await;
            }
        }

        *last = Some(Instant::now());
    }
}

/// Messages API request format.
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<WireMessage>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    content: String,
}

/// Messages API response format.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: WireUsage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    input_tokens: u32,
    output_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Error envelope returned by the API on non-200 statuses.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ApiErrorBody,
}

/// Lift system messages into the top-level `system` field; everything else
/// goes into the message list as user turns.
fn build_wire_request(model: &str, request: &ChatRequest) -> MessagesRequest {
    let mut system_parts = Vec::new();
    let mut messages = Vec::new();

    for message in &request.messages {
        match message.role {
            ChatRole::System => system_parts.push(message.content.clone()),
            ChatRole::User => messages.push(WireMessage {
                role: "user",
                content: message.content.clone(),
            }),
        }
    }

    MessagesRequest {
        model: model.to_string(),
        max_tokens: request.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
        temperature: request.temperature,
        system: if system_parts.is_empty() {
            None
        } else {
            Some(system_parts.join("\n\n"))
        },
        messages,
    }
}

#[async_trait]
impl AiClient for ClaudeClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        self.rate_limit().await;

        let wire_request = build_wire_request(&self.config.model, &request);

        tracing::debug!(
            prompt_name = prompt_name,
            model = %self.config.model,
            "Calling AI API"
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.config.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("content-type", "application/json")
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        let status = response.status().as_u16();

        if status == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(AiError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| AiError::Request(e.to_string()))?;

        if status != 200 {
            if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(&body) {
                return Err(AiError::Api {
                    status,
                    message: envelope.error.message,
                });
            }
            return Err(AiError::Api {
                status,
                message: body,
            });
        }

        let parsed: MessagesResponse =
            serde_json::from_str(&body).map_err(|e| AiError::Parse(e.to_string()))?;

        // Extract text from the first text content block
        let text = parsed
            .content
            .into_iter()
            .find_map(|block| {
                if block.block_type == "text" {
                    block.text
                } else {
                    None
                }
            })
            .ok_or_else(|| AiError::Parse("No text content in response".to_string()))?;

        Ok(ChatResponse {
            content: text,
            usage: Usage {
                input_tokens: parsed.usage.input_tokens,
                output_tokens: parsed.usage.output_tokens,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;

    #[test]
    fn test_system_messages_lifted_out_of_message_list() {
        let request = ChatRequest {
            messages: vec![
                ChatMessage::system("You are terse."),
                ChatMessage::user("hello"),
            ],
            max_tokens: Some(64),
            temperature: None,
        };

        let wire = build_wire_request("claude-3-5-haiku-latest", &request);

        assert_eq!(wire.system.as_deref(), Some("You are terse."));
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(wire.messages[0].role, "user");
        assert_eq!(wire.max_tokens, 64);
    }

    #[test]
    fn test_wire_request_skips_absent_fields() {
        let request = ChatRequest {
            messages: vec![ChatMessage::user("hello")],
            max_tokens: None,
            temperature: None,
        };

        let wire = build_wire_request("claude-3-5-haiku-latest", &request);
        let json = serde_json::to_value(&wire).unwrap();

        assert!(json.get("system").is_none());
        assert!(json.get("temperature").is_none());
        assert_eq!(json["max_tokens"], DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn test_response_parse_extracts_first_text_block() {
        let body = r#"{
            "content": [
                {"type": "tool_use", "id": "x", "name": "y", "input": {}},
                {"type": "text", "text": "hello there"}
            ],
            "usage": {"input_tokens": 12, "output_tokens": 3}
        }"#;

        let parsed: MessagesResponse = serde_json::from_str(body).unwrap();
        let text = parsed
            .content
            .into_iter()
            .find_map(|b| if b.block_type == "text" { b.text } else { None })
            .unwrap();

        assert_eq!(text, "hello there");
        assert_eq!(parsed.usage.input_tokens, 12);
    }
}
