//! Recipe generation: one structured call from a free-text ingredient list.

use serde::{Deserialize, Serialize};

use crate::ai::prompts::generate_recipe::{
    render_generate_recipe_prompt, GENERATE_RECIPE_PROMPT_NAME,
};
use crate::ai::{AiClient, ChatMessage, ChatRequest, Usage};
use crate::error::GenerationError;

/// A generated recipe.
///
/// Serialized field names are the wire contract: `recipeName`,
/// `ingredients`, `instructions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedRecipe {
    pub recipe_name: String,
    /// Ingredient descriptions, ideally "item (quantity)". May be empty if
    /// the model returns none.
    pub ingredients: Vec<String>,
    /// Freeform multi-line cooking instructions.
    pub instructions: String,
}

/// Result of a generation call.
#[derive(Debug)]
pub struct GenerateRecipeResult {
    pub recipe: GeneratedRecipe,
    pub usage: Usage,
}

/// Generate a recipe from the given ingredient list.
///
/// The input is forwarded as-is, with no length or content validation;
/// empty input is allowed. Any failure of the external call, including a
/// response that does not conform to the declared shape, is a
/// `GenerationError`. Never retried.
pub async fn generate_recipe(
    ai_client: &dyn AiClient,
    ingredients: &str,
) -> Result<GenerateRecipeResult, GenerationError> {
    let prompt = render_generate_recipe_prompt(ingredients);
    let request = ChatRequest {
        messages: vec![ChatMessage::user(prompt)],
        max_tokens: Some(1024),
        temperature: Some(0.7),
    };

    let response = ai_client
        .complete(GENERATE_RECIPE_PROMPT_NAME, request)
        .await?;

    let recipe: GeneratedRecipe = serde_json::from_str(&response.content).map_err(|e| {
        GenerationError::InvalidShape(format!("Failed to parse recipe response: {}", e))
    })?;

    Ok(GenerateRecipeResult {
        recipe,
        usage: response.usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;

    #[tokio::test]
    async fn test_generate_parses_conforming_response() {
        let client = FakeAiClient::with_response(
            "highly skilled chef",
            r#"{"recipeName": "Lemon Pasta", "ingredients": ["spaghetti (200g)", "lemon (1)"], "instructions": "Boil. Zest. Toss."}"#,
        );

        let result = generate_recipe(&client, "spaghetti, lemon").await.unwrap();

        assert_eq!(result.recipe.recipe_name, "Lemon Pasta");
        assert_eq!(result.recipe.ingredients.len(), 2);
        assert!(result.recipe.instructions.starts_with("Boil"));
    }

    #[tokio::test]
    async fn test_nonconforming_response_is_invalid_shape() {
        let client =
            FakeAiClient::with_response("highly skilled chef", r#"{"recipeName": "No Fields"}"#);

        let err = generate_recipe(&client, "mystery").await.unwrap_err();
        assert!(matches!(err, GenerationError::InvalidShape(_)));
    }

    #[tokio::test]
    async fn test_transport_failure_is_request_error() {
        let client = FakeAiClient::new();

        let err = generate_recipe(&client, "anything").await.unwrap_err();
        assert!(matches!(err, GenerationError::Request(_)));
    }

    #[tokio::test]
    async fn test_empty_ingredient_list_in_response_is_allowed() {
        let client = FakeAiClient::with_response(
            "highly skilled chef",
            r#"{"recipeName": "Air Soup", "ingredients": [], "instructions": "Simmer nothing."}"#,
        );

        let result = generate_recipe(&client, "").await.unwrap();
        assert!(result.recipe.ingredients.is_empty());
    }
}
