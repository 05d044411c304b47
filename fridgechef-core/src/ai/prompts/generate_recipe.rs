//! Recipe generation prompt: available ingredients in, full recipe out.

/// Prompt name for logging and call accounting.
pub const GENERATE_RECIPE_PROMPT_NAME: &str = "generate_recipe";

/// Render the generation prompt for a comma-separated ingredient list.
pub fn render_generate_recipe_prompt(ingredients: &str) -> String {
    format!(
        r#"You are a highly skilled chef, known for creating innovative and delicious recipes using a variety of ingredients. Given the following ingredients, generate a detailed and easy-to-follow recipe, optimized for home cooks.

Ingredients: {ingredients}

When creating the recipe:
- Give the recipe a creative and mouth-watering name.
- List every ingredient with a precise quantity, formatted as "item (quantity)" (e.g., "olive oil (1 tbsp)").
- Provide clear, step-by-step instructions, with cooking times and temperatures where they matter.
- Do not include ingredients that don't fit the recipe; substitute from the provided list instead.
- Make effective use of the given quantities and aim for a well-balanced, flavorful dish.

Respond with JSON only, no other text: {{"recipeName": "string", "ingredients": ["item (quantity)"], "instructions": "string"}}"#,
        ingredients = ingredients
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt() {
        let prompt = render_generate_recipe_prompt("chicken, broccoli, cheese");

        assert!(prompt.contains("chicken, broccoli, cheese"));
        assert!(prompt.contains("recipeName"));
        assert!(prompt.contains("instructions"));
    }

    #[test]
    fn test_render_prompt_forwards_empty_input() {
        let prompt = render_generate_recipe_prompt("");
        assert!(prompt.contains("Ingredients: \n"));
    }
}
