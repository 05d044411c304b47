//! Recipe summarization: a best-effort enrichment of a generated recipe.

use serde::Deserialize;

use crate::ai::generate_recipe::GeneratedRecipe;
use crate::ai::prompts::recipe_summary::{
    render_recipe_summary_prompt, RECIPE_SUMMARY_PROMPT_NAME,
};
use crate::ai::{AiClient, ChatMessage, ChatRequest, Usage};
use crate::error::SummaryError;

/// Response format from the AI.
#[derive(Debug, Deserialize)]
struct SummaryResponse {
    summary: String,
}

/// Result of a summarization call.
#[derive(Debug)]
pub struct RecipeSummaryResult {
    pub summary: String,
    pub usage: Usage,
}

/// Summarize an already-generated recipe in one paragraph.
///
/// The ingredient list is flattened to a comma-joined string before
/// dispatch. Failure here must never invalidate the recipe the caller
/// already holds.
pub async fn summarize_recipe(
    ai_client: &dyn AiClient,
    recipe: &GeneratedRecipe,
) -> Result<RecipeSummaryResult, SummaryError> {
    let ingredients = recipe.ingredients.join(", ");
    let prompt =
        render_recipe_summary_prompt(&recipe.recipe_name, &ingredients, &recipe.instructions);
    let request = ChatRequest {
        messages: vec![ChatMessage::user(prompt)],
        max_tokens: Some(512),
        temperature: Some(0.5),
    };

    let response = ai_client
        .complete(RECIPE_SUMMARY_PROMPT_NAME, request)
        .await?;

    let parsed: SummaryResponse = serde_json::from_str(&response.content).map_err(|e| {
        SummaryError::InvalidShape(format!("Failed to parse summary response: {}", e))
    })?;

    Ok(RecipeSummaryResult {
        summary: parsed.summary,
        usage: response.usage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::FakeAiClient;

    fn sample_recipe() -> GeneratedRecipe {
        GeneratedRecipe {
            recipe_name: "Cheesy Chicken Broccoli Bake".to_string(),
            ingredients: vec![
                "chicken breast (1 lb)".to_string(),
                "broccoli florets (2 cups)".to_string(),
            ],
            instructions: "Bake at 400°F for 25 minutes.".to_string(),
        }
    }

    #[tokio::test]
    async fn test_summarize_flattens_ingredients() {
        let client = FakeAiClient::with_response(
            "recipe summarizer",
            r#"{"summary": "Chicken and broccoli baked under cheese."}"#,
        );

        let result = summarize_recipe(&client, &sample_recipe()).await.unwrap();
        assert_eq!(result.summary, "Chicken and broccoli baked under cheese.");

        let prompts = client.prompts("recipe_summary");
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("chicken breast (1 lb), broccoli florets (2 cups)"));
    }

    #[tokio::test]
    async fn test_nonconforming_response_is_invalid_shape() {
        let client = FakeAiClient::with_response("recipe summarizer", "Sure! Here's a summary.");

        let err = summarize_recipe(&client, &sample_recipe())
            .await
            .unwrap_err();
        assert!(matches!(err, SummaryError::InvalidShape(_)));
    }
}
