//! HTTP API handlers, one file per route.

pub mod generate;
pub mod history;
pub mod ping;
pub mod summarize;

use axum::routing::{get, post};
use axum::Router;
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::SharedState;

/// Shared error response used by all endpoints.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        generate::generate,
        summarize::summarize,
        history::list_history,
        ping::ping
    ),
    components(schemas(
        ErrorResponse,
        generate::GenerateRequest,
        generate::GenerateResponse,
        summarize::SummarizeRequest,
        summarize::SummarizeResponse,
        history::HistoryEntryResponse,
        history::HistoryResponse,
        ping::PingResponse
    ))
)]
pub struct ApiDoc;

pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/recipes/generate", post(generate::generate))
        .route("/api/recipes/summarize", post(summarize::summarize))
        .route("/api/history", get(history::list_history))
        .route("/api/ping", get(ping::ping))
        .with_state(state)
}
