//! Prompt templates.

pub mod generate_recipe;
pub mod recipe_summary;

pub use generate_recipe::render_generate_recipe_prompt;
pub use recipe_summary::render_recipe_summary_prompt;
