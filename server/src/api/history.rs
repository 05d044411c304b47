use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::ErrorResponse;
use crate::SharedState;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntryResponse {
    pub id: String,
    pub ingredients: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipe_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HistoryResponse {
    pub entries: Vec<HistoryEntryResponse>,
}

#[utoipa::path(
    get,
    path = "/api/history",
    tag = "history",
    responses(
        (status = 200, description = "All past submissions in insertion order", body = HistoryResponse),
        (status = 500, description = "History could not be read", body = ErrorResponse)
    )
)]
pub async fn list_history(State(state): State<SharedState>) -> impl IntoResponse {
    match state.history.load() {
        Ok(entries) => {
            let entries = entries
                .into_iter()
                .map(|e| HistoryEntryResponse {
                    id: e.id,
                    ingredients: e.ingredients,
                    recipe_name: e.recipe_name,
                })
                .collect();
            (StatusCode::OK, Json(HistoryResponse { entries })).into_response()
        }
        Err(e) => {
            tracing::error!("Failed to load history: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to load history".to_string(),
                }),
            )
                .into_response()
        }
    }
}
