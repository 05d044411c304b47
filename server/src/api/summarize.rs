use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use fridgechef_core::{summarize_recipe, GeneratedRecipe};

use crate::api::ErrorResponse;
use crate::SharedState;

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummarizeRequest {
    pub recipe_name: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[utoipa::path(
    post,
    path = "/api/recipes/summarize",
    tag = "recipes",
    request_body = SummarizeRequest,
    responses(
        (status = 200, description = "Summary produced", body = SummarizeResponse),
        (status = 502, description = "Summarization failed", body = ErrorResponse)
    )
)]
pub async fn summarize(
    State(state): State<SharedState>,
    Json(request): Json<SummarizeRequest>,
) -> impl IntoResponse {
    let recipe = GeneratedRecipe {
        recipe_name: request.recipe_name,
        ingredients: request.ingredients,
        instructions: request.instructions,
    };

    match summarize_recipe(state.ai.as_ref(), &recipe).await {
        Ok(result) => (
            StatusCode::OK,
            Json(SummarizeResponse {
                summary: result.summary,
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to summarize recipe: {}", e);
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
