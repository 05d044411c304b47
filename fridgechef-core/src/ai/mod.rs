//! AI client module for recipe generation and summarization.
//!
//! This module provides:
//! - `AiClient` trait for abstracting AI providers
//! - `ClaudeClient` implementation against the Anthropic messages API
//! - `FakeAiClient` for offline runs and tests
//! - The two prompt templates and their typed operations
//!
//! # Configuration
//!
//! Set these environment variables:
//!
//! - `ANTHROPIC_API_KEY` (required for the `claude` provider): API key
//! - `FRIDGECHEF_AI_PROVIDER` (optional): "claude" (default) or "fake"
//! - `FRIDGECHEF_AI_MODEL` (optional): Model name
//! - `FRIDGECHEF_AI_BASE_URL` (optional): API base URL
//! - `FRIDGECHEF_AI_RATE_LIMIT_MS` (optional): Delay between requests in ms
//!
//! # Example
//!
//! ```ignore
//! use fridgechef_core::ai::{client_from_config, generate_recipe, AiConfig};
//!
//! let config = AiConfig::from_env()?;
//! let client = client_from_config(&config)?;
//!
//! let result = generate_recipe(client.as_ref(), "chicken, broccoli, cheese").await?;
//! println!("{}", result.recipe.recipe_name);
//! ```

mod client;
mod config;
mod fake;
mod generate_recipe;
pub mod prompts;
mod recipe_summary;
mod types;

pub use client::{client_from_config, AiClient, AiError, ClaudeClient};
pub use config::{AiConfig, AiProvider, ConfigError};
pub use fake::FakeAiClient;
pub use generate_recipe::{generate_recipe, GenerateRecipeResult, GeneratedRecipe};
pub use recipe_summary::{summarize_recipe, RecipeSummaryResult};
pub use types::{ChatMessage, ChatRequest, ChatResponse, ChatRole, Usage};
