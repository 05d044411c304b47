//! Fake AI client for testing and offline runs.
//!
//! Responses are matched by checking whether the rendered prompt contains a
//! registered substring, so tests run without network access or API costs.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use super::client::{AiClient, AiError};
use super::types::{ChatRequest, ChatResponse, Usage};

/// A fake AI client.
///
/// Responses are matched case-insensitively by prompt substring. If no match
/// is found, returns the default response if one is set, otherwise an error.
/// Every call is recorded per prompt name so tests can assert call counts
/// and inspect the prompts that were dispatched.
#[derive(Debug)]
pub struct FakeAiClient {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
    /// Prompts seen so far, keyed by prompt name
    seen: RwLock<HashMap<String, Vec<String>>>,
}

impl FakeAiClient {
    /// Create a new client with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
            seen: RwLock::new(HashMap::new()),
        }
    }

    /// Create a client that returns a specific response for prompts
    /// containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut client = Self::new();
        client.add_response(prompt_contains, response);
        client
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Create a client with canned responses for both recipe prompts, so
    /// the whole app can run offline.
    pub fn with_recipe_responses() -> Self {
        let mut client = Self::new();

        client.add_response(
            "highly skilled chef",
            r#"{
                "recipeName": "Fridge Surprise Stir Fry",
                "ingredients": [
                    "1 lb chicken breast (cubed)",
                    "2 cups broccoli florets (chopped)",
                    "1 cup cheddar (shredded)"
                ],
                "instructions": "1. Heat a wok over high heat.\n2. Stir-fry the chicken for 5 minutes.\n3. Add the broccoli and cook 3 more minutes.\n4. Top with cheddar and serve."
            }"#,
        );

        client.add_response(
            "recipe summarizer",
            r#"{"summary": "A quick stir fry that turns whatever is in the fridge into a weeknight dinner."}"#,
        );

        client
    }

    /// Number of calls made under the given prompt name.
    pub fn calls(&self, prompt_name: &str) -> usize {
        self.seen
            .read()
            .unwrap()
            .get(prompt_name)
            .map(Vec::len)
            .unwrap_or(0)
    }

    /// The prompts dispatched under the given prompt name, in call order.
    pub fn prompts(&self, prompt_name: &str) -> Vec<String> {
        self.seen
            .read()
            .unwrap()
            .get(prompt_name)
            .cloned()
            .unwrap_or_default()
    }
}

impl Default for FakeAiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(
        &self,
        prompt_name: &str,
        request: ChatRequest,
    ) -> Result<ChatResponse, AiError> {
        let prompt: String = request
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        self.seen
            .write()
            .unwrap()
            .entry(prompt_name.to_string())
            .or_default()
            .push(prompt.clone());

        let responses = self.responses.read().unwrap();

        // Find first matching pattern (case-insensitive)
        let prompt_lower = prompt.to_lowercase();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(ChatResponse {
                    content: response.clone(),
                    usage: Usage::default(),
                });
            }
        }

        match &self.default_response {
            Some(response) => Ok(ChatResponse {
                content: response.clone(),
                usage: Usage::default(),
            }),
            None => Err(AiError::Request(format!(
                "FakeAiClient: No response configured for prompt (first 100 chars): {}",
                &prompt[..prompt.len().min(100)]
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;

    fn user_request(content: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user(content)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_matching() {
        let client = FakeAiClient::with_response("hello", "world");
        let result = client
            .complete("test", user_request("Say hello to the user"))
            .await
            .unwrap();
        assert_eq!(result.content, "world");
    }

    #[tokio::test]
    async fn test_case_insensitive() {
        let client = FakeAiClient::with_response("HELLO", "world");
        let result = client
            .complete("test", user_request("hello there"))
            .await
            .unwrap();
        assert_eq!(result.content, "world");
    }

    #[tokio::test]
    async fn test_no_match_is_an_error() {
        let client = FakeAiClient::new();
        let result = client.complete("test", user_request("random prompt")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_default_response() {
        let client = FakeAiClient::new().with_default_response("default");
        let result = client
            .complete("test", user_request("random prompt"))
            .await
            .unwrap();
        assert_eq!(result.content, "default");
    }

    #[tokio::test]
    async fn test_call_accounting() {
        let client = FakeAiClient::new().with_default_response("ok");
        client
            .complete("generate_recipe", user_request("first"))
            .await
            .unwrap();
        client
            .complete("generate_recipe", user_request("second"))
            .await
            .unwrap();

        assert_eq!(client.calls("generate_recipe"), 2);
        assert_eq!(client.calls("recipe_summary"), 0);
        assert_eq!(client.prompts("generate_recipe"), vec!["first", "second"]);
    }
}
