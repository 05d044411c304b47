use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use fridgechef_core::{generate_recipe, HistoryEntry};

use crate::api::ErrorResponse;
use crate::SharedState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerateRequest {
    /// Comma-separated ingredient names. Forwarded as-is; may be empty.
    pub ingredients: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub recipe_name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

#[utoipa::path(
    post,
    path = "/api/recipes/generate",
    tag = "recipes",
    request_body = GenerateRequest,
    responses(
        (status = 200, description = "Recipe generated; a history entry was recorded", body = GenerateResponse),
        (status = 502, description = "Generation failed", body = ErrorResponse)
    )
)]
pub async fn generate(
    State(state): State<SharedState>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse {
    match generate_recipe(state.ai.as_ref(), &request.ingredients).await {
        Ok(result) => {
            let entry = HistoryEntry::new(
                request.ingredients.clone(),
                Some(result.recipe.recipe_name.clone()),
            );
            if let Err(e) = state.history.append(entry) {
                tracing::warn!("Failed to persist history entry: {}", e);
            }

            let recipe = result.recipe;
            (
                StatusCode::OK,
                Json(GenerateResponse {
                    recipe_name: recipe.recipe_name,
                    ingredients: recipe.ingredients,
                    instructions: recipe.instructions,
                }),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!("Failed to generate recipe: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
