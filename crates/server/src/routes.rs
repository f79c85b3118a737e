use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(handlers::health_check))
        // Model-backed
        .route("/api/recommendations", post(handlers::recommend))
        .route("/api/search", get(handlers::search))
        // Movie database passthroughs
        .route("/api/trending", get(handlers::trending))
        .route("/api/movie/{id}", get(handlers::movie_details))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
