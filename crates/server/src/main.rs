//! Recommendation API server.
//!
//! Loads the trained artifacts (if present), connects the movie database
//! client and serves the HTTP API.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use server::{AppState, Config, create_router, load_model};
use tmdb_client::TmdbClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")),
        )
        .init();

    let config = Config::from_env().context("Invalid server configuration")?;
    let api_key = config.api_key()?.to_string();

    let model = load_model(&config.model_dir);
    let metadata = Arc::new(TmdbClient::new(api_key, config.tmdb_api_url.clone()));
    let state = AppState::new(model, metadata);

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server running on http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
