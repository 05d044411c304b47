//! AI configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default Anthropic API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";

/// Default delay between requests in milliseconds.
pub const DEFAULT_RATE_LIMIT_MS: u64 = 500;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Unknown AI provider: {0}")]
    UnknownProvider(String),
}

/// Which client implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProvider {
    Claude,
    Fake,
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub provider: AiProvider,
    /// API key; present when the provider needs one.
    pub api_key: Option<String>,
    /// Model name (e.g., "claude-3-5-haiku-latest").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Milliseconds to wait between requests.
    pub rate_limit_ms: u64,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required for the `claude` provider:
    /// - `ANTHROPIC_API_KEY`: API key
    ///
    /// Optional:
    /// - `FRIDGECHEF_AI_PROVIDER`: "claude" (default) or "fake"
    /// - `FRIDGECHEF_AI_MODEL`: Model name (default: "claude-3-5-haiku-latest")
    /// - `FRIDGECHEF_AI_BASE_URL`: API base URL (default: "https://api.anthropic.com")
    /// - `FRIDGECHEF_AI_RATE_LIMIT_MS`: Rate limit in ms (default: 500)
    pub fn from_env() -> Result<Self, ConfigError> {
        let provider = match env::var("FRIDGECHEF_AI_PROVIDER")
            .unwrap_or_else(|_| "claude".to_string())
            .as_str()
        {
            "claude" => AiProvider::Claude,
            "fake" => AiProvider::Fake,
            other => return Err(ConfigError::UnknownProvider(other.to_string())),
        };

        let api_key = match provider {
            AiProvider::Claude => Some(env::var("ANTHROPIC_API_KEY").map_err(|_| {
                ConfigError::MissingEnvVar("ANTHROPIC_API_KEY".to_string())
            })?),
            AiProvider::Fake => None,
        };

        let model = env::var("FRIDGECHEF_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("FRIDGECHEF_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let rate_limit_ms = env::var("FRIDGECHEF_AI_RATE_LIMIT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_RATE_LIMIT_MS);

        Ok(Self {
            provider,
            api_key,
            model,
            base_url,
            rate_limit_ms,
        })
    }
}
