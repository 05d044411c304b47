mod api;

use anyhow::Context;
use axum::extract::MatchedPath;
use axum::http::Request;
use std::env;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use fridgechef_core::{
    client_from_config, AiClient, AiConfig, HistoryStore, JsonFileStore, MemoryStore,
};

/// Application state shared across all handlers.
pub struct AppState {
    pub ai: Arc<dyn AiClient>,
    pub history: Arc<dyn HistoryStore>,
}

pub type SharedState = Arc<AppState>;

fn init_telemetry() {
    let fmt_layer = tracing_subscriber::fmt::layer();
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_telemetry();

    let config = AiConfig::from_env().context("Loading AI configuration")?;
    let ai = client_from_config(&config)?;

    let ephemeral = env::var("FRIDGECHEF_EPHEMERAL")
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    let history: Arc<dyn HistoryStore> = if ephemeral {
        tracing::info!("History is in-memory only for this run");
        Arc::new(MemoryStore::new())
    } else {
        let store = JsonFileStore::new(JsonFileStore::default_path());
        tracing::info!("Persisting history to {}", store.path().display());
        Arc::new(store)
    };

    let state = Arc::new(AppState { ai, history });

    let app = api::router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::ApiDoc::openapi()))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<axum::body::Body>| {
                let path = request
                    .extensions()
                    .get::<MatchedPath>()
                    .map(MatchedPath::as_str);
                tracing::info_span!("request", method = %request.method(), path)
            }),
        );

    let bind = env::var("FRIDGECHEF_BIND").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("Binding {}", bind))?;
    tracing::info!("FridgeChef server listening on {}", bind);

    axum::serve(listener, app).await?;

    Ok(())
}
