use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tmdb_client::{MovieDetails, TmdbId};
use tracing::info;

use recommender::DEFAULT_COUNT;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Titles returned by the search route
pub const SEARCH_LIMIT: usize = 10;

/// Movies returned by the trending route
pub const TRENDING_LIMIT: usize = 10;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default, alias = "movie_title")]
    pub title: Option<String>,
    #[serde(default, alias = "num_recommendations")]
    pub count: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationItem {
    #[serde(flatten)]
    pub details: MovieDetails,
    pub similarity_score: f32,
}

#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub resolved_title: String,
    pub recommendations: Vec<RecommendationItem>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse<T> {
    pub movies: Vec<T>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}

/// Rejects missing and whitespace-only values; the value itself is matched as given
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// Handlers

pub async fn recommend(
    State(state): State<AppState>,
    body: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<RecommendResponse>> {
    let Json(request) = body.map_err(|e| AppError::InvalidInput(e.body_text()))?;
    let title = non_empty(request.title)
        .ok_or_else(|| AppError::InvalidInput("Movie title is required".to_string()))?;
    let recommender = state.recommender()?;
    let count = match request.count {
        None => DEFAULT_COUNT,
        Some(n) if n >= 1 => n as usize,
        Some(n) => {
            return Err(AppError::InvalidInput(format!(
                "Recommendation count must be at least 1, got {}",
                n
            )));
        }
    };

    let set = recommender.recommend(&title, count).await?;
    info!(
        "Recommended {} movies for \"{}\"",
        set.recommendations.len(),
        set.resolved_title
    );

    Ok(Json(RecommendResponse {
        resolved_title: set.resolved_title,
        recommendations: set
            .recommendations
            .into_iter()
            .map(|r| RecommendationItem {
                details: r.payload,
                similarity_score: r.score,
            })
            .collect(),
    }))
}

pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<MoviesResponse<String>>> {
    let query = non_empty(params.q)
        .ok_or_else(|| AppError::InvalidInput("Search query is required".to_string()))?;
    let model = state.model()?;

    let movies = model
        .movies()
        .search_titles(&query, SEARCH_LIMIT)
        .into_iter()
        .map(str::to_string)
        .collect();
    Ok(Json(MoviesResponse { movies }))
}

pub async fn trending(State(state): State<AppState>) -> AppResult<Json<MoviesResponse<Value>>> {
    let movies = state.metadata().trending(TRENDING_LIMIT).await?;
    Ok(Json(MoviesResponse { movies }))
}

pub async fn movie_details(
    State(state): State<AppState>,
    Path(id): Path<TmdbId>,
) -> AppResult<Json<Value>> {
    state
        .metadata()
        .movie(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Movie {} not found", id)))
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        model_loaded: state.model_loaded(),
    })
}
