use std::sync::Arc;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use data_loader::{SourceMovie, TrainedModel};
use pipeline::{MinimalTags, Trainer};
use server::{AppState, create_router, load_model};
use tmdb_client::{MetadataSource, MovieDetails, TmdbError, TmdbId};

/// In-memory movie database: every title is found by search, "Delta" has no
/// poster, movie 603 has a full record and movie 500 fails.
struct FakeMovieDb;

#[async_trait]
impl MetadataSource for FakeMovieDb {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn movie_details(&self, _id: TmdbId) -> tmdb_client::Result<Option<MovieDetails>> {
        Ok(None)
    }

    async fn search_movie(&self, title: &str) -> tmdb_client::Result<Option<MovieDetails>> {
        Ok(Some(MovieDetails {
            id: title.len() as TmdbId,
            title: title.to_string(),
            overview: Some(format!("About {}", title)),
            poster_path: (title != "Delta").then(|| format!("/{}.jpg", title.to_lowercase())),
            release_date: Some("1999-03-31".to_string()),
            vote_average: 8.1,
            vote_count: 2000,
            trailer_url: None,
        }))
    }

    async fn trailer_url(&self, _id: TmdbId) -> tmdb_client::Result<Option<String>> {
        Ok(Some("https://www.youtube.com/watch?v=abc".to_string()))
    }

    async fn trending(&self, limit: usize) -> tmdb_client::Result<Vec<Value>> {
        Ok((0..15).map(|i| json!({ "id": i })).take(limit).collect())
    }

    async fn movie(&self, id: TmdbId) -> tmdb_client::Result<Option<Value>> {
        match id {
            603 => Ok(Some(json!({ "id": 603, "title": "The Matrix", "credits": {} }))),
            500 => Err(TmdbError::Status {
                status: 500,
                body: "down".to_string(),
            }),
            _ => Ok(None),
        }
    }
}

fn trained_model() -> Arc<TrainedModel> {
    let rows = vec![
        SourceMovie::minimal("Alpha", "space war"),
        SourceMovie::minimal("Beta", "space war"),
        SourceMovie::minimal("Gamma", "romance drama"),
        SourceMovie::minimal("Delta", "space opera"),
    ];
    Arc::new(Trainer::new(MinimalTags).train(rows).unwrap())
}

/// Titles where a leading space changes which one matches first
fn bat_model() -> Arc<TrainedModel> {
    let rows = vec![
        SourceMovie::minimal("Batman Begins", "gotham vigilante"),
        SourceMovie::minimal("The Bat", "mansion mystery"),
        SourceMovie::minimal("Other", "gotham mystery"),
    ];
    Arc::new(Trainer::new(MinimalTags).train(rows).unwrap())
}

fn create_test_server(model: Option<Arc<TrainedModel>>) -> TestServer {
    let state = AppState::new(model, Arc::new(FakeMovieDb));
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(Some(trained_model()));

    let response = server.get("/api/health").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "status": "healthy", "model_loaded": true }));
}

#[tokio::test]
async fn test_health_without_model() {
    let server = create_test_server(None);
    let body: Value = server.get("/api/health").await.json();
    assert_eq!(body["model_loaded"], false);
}

#[tokio::test]
async fn test_recommendations_skip_movies_without_poster() {
    let server = create_test_server(Some(trained_model()));

    let response = server
        .post("/api/recommendations")
        .json(&json!({ "title": "alpha", "count": 2 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["resolved_title"], "Alpha");
    let recs = body["recommendations"].as_array().unwrap();
    let titles: Vec<&str> = recs.iter().map(|r| r["title"].as_str().unwrap()).collect();
    // Delta ranks second but has no poster
    assert_eq!(titles, vec!["Beta", "Gamma"]);
    let score = recs[0]["similarity_score"].as_f64().unwrap();
    assert!((score - 2.0 / 3.0).abs() < 1e-6);
    assert_eq!(recs[0]["poster_path"], "/beta.jpg");
    assert_eq!(recs[0]["trailer_url"], "https://www.youtube.com/watch?v=abc");
}

#[tokio::test]
async fn test_recommendations_accept_legacy_field_names() {
    let server = create_test_server(Some(trained_model()));

    let response = server
        .post("/api/recommendations")
        .json(&json!({ "movie_title": "Beta", "num_recommendations": 1 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 1);
    assert_eq!(body["recommendations"][0]["title"], "Alpha");
}

#[tokio::test]
async fn test_recommendations_require_title() {
    let server = create_test_server(Some(trained_model()));

    let response = server
        .post("/api/recommendations")
        .json(&json!({ "count": 3 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Movie title is required");
}

#[tokio::test]
async fn test_recommendations_reject_blank_title() {
    let server = create_test_server(Some(trained_model()));

    let response = server
        .post("/api/recommendations")
        .json(&json!({ "title": "   " }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["error"], "Movie title is required");
}

#[tokio::test]
async fn test_recommendations_match_title_as_given() {
    let server = create_test_server(Some(bat_model()));

    let response = server
        .post("/api/recommendations")
        .json(&json!({ "title": " bat", "count": 1 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["resolved_title"], "The Bat");
}

#[tokio::test]
async fn test_recommendations_with_huge_count() {
    let server = create_test_server(Some(trained_model()));

    let response = server
        .post("/api/recommendations")
        .json(&json!({ "title": "alpha", "count": 1_000_000_000_000i64 }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_recommendations_reject_zero_count() {
    let server = create_test_server(Some(trained_model()));

    let response = server
        .post("/api/recommendations")
        .json(&json!({ "title": "Alpha", "count": 0 }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommendations_unknown_title() {
    let server = create_test_server(Some(trained_model()));

    let response = server
        .post("/api/recommendations")
        .json(&json!({ "title": "Zeta" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("Zeta"));
}

#[tokio::test]
async fn test_recommendations_without_model() {
    let server = create_test_server(None);

    let response = server
        .post("/api/recommendations")
        .json(&json!({ "title": "Alpha" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_search_titles() {
    let server = create_test_server(Some(trained_model()));

    let response = server.get("/api/search").add_query_param("q", "ta").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["movies"], json!(["Beta", "Delta"]));
}

#[tokio::test]
async fn test_search_keeps_surrounding_whitespace() {
    let server = create_test_server(Some(bat_model()));

    let response = server.get("/api/search").add_query_param("q", " bat").await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["movies"], json!(["The Bat"]));
}

#[tokio::test]
async fn test_search_requires_query() {
    let server = create_test_server(Some(trained_model()));
    server
        .get("/api/search")
        .await
        .assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_trending_is_limited() {
    let server = create_test_server(None);

    let body: Value = server.get("/api/trending").await.json();

    assert_eq!(body["movies"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn test_movie_passthrough() {
    let server = create_test_server(None);

    let response = server.get("/api/movie/603").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["title"], "The Matrix");

    server
        .get("/api/movie/1")
        .await
        .assert_status(StatusCode::NOT_FOUND);
    server
        .get("/api/movie/500")
        .await
        .assert_status(StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_load_model_from_saved_artifacts() {
    let dir = tempfile::TempDir::new().unwrap();
    assert!(load_model(dir.path()).is_none());

    trained_model().save(dir.path()).unwrap();
    let server = create_test_server(load_model(dir.path()));

    let body: Value = server.get("/api/health").await.json();
    assert_eq!(body["model_loaded"], true);
}
