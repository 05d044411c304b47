//! Recipe summary prompt: a generated recipe in, a one-paragraph summary out.

/// Prompt name for logging and call accounting.
pub const RECIPE_SUMMARY_PROMPT_NAME: &str = "recipe_summary";

/// Render the summary prompt. `ingredients` is the comma-joined ingredient
/// list of the recipe being summarized.
pub fn render_recipe_summary_prompt(
    recipe_name: &str,
    ingredients: &str,
    instructions: &str,
) -> String {
    format!(
        r#"You are an expert recipe summarizer. Given the recipe name, ingredients, and instructions, create a short one-paragraph summary of the recipe.

Recipe Name: {recipe_name}
Ingredients: {ingredients}
Instructions: {instructions}

Respond with JSON only, no other text: {{"summary": "string"}}"#,
        recipe_name = recipe_name,
        ingredients = ingredients,
        instructions = instructions
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_prompt() {
        let prompt = render_recipe_summary_prompt(
            "Chicken Stir Fry",
            "chicken (1 lb), soy sauce (2 tbsp)",
            "Cook the chicken, add the sauce.",
        );

        assert!(prompt.contains("Chicken Stir Fry"));
        assert!(prompt.contains("soy sauce (2 tbsp)"));
        assert!(prompt.contains("summary"));
    }
}
