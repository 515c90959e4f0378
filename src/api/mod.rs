//! HTTP API: agent turns, file parsing, health.

mod chat;
mod files;
pub mod types;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::agent::Agent;
use crate::config::Config;

use types::HealthResponse;

/// Shared state for all routes.
pub(crate) struct AppState {
    pub agent: Agent,
}

/// Build the application router.
pub fn router(agent: Agent) -> Router {
    let state = Arc::new(AppState { agent });

    Router::new()
        .route("/health", get(health))
        .route("/api/agent", post(chat::run_agent))
        .route("/api/parse-file", post(files::parse_file))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind and serve until shutdown.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let agent = Agent::new(&config);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, router(agent)).await?;

    Ok(())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
