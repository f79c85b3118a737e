//! Exercises `TmdbClient` against a local fake of the movie database API.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tmdb_client::{MetadataSource, TmdbClient, TmdbError};

const API_KEY: &str = "test-key";

type Params = Query<HashMap<String, String>>;

fn authorized(params: &HashMap<String, String>) -> bool {
    params.get("api_key").map(String::as_str) == Some(API_KEY)
        && params.get("language").map(String::as_str) == Some("en-US")
}

fn avatar() -> serde_json::Value {
    json!({
        "id": 19995,
        "title": "Avatar",
        "overview": "A paraplegic marine",
        "poster_path": "/avatar.jpg",
        "release_date": "2009-12-10",
        "vote_average": 7.2,
        "vote_count": 11800
    })
}

async fn movie(Path(id): Path<u64>, Query(params): Params) -> Response {
    if !authorized(&params) {
        return StatusCode::UNAUTHORIZED.into_response();
    }
    match id {
        19995 => {
            let mut body = avatar();
            if params.get("append_to_response").is_some() {
                body["credits"] = json!({"cast": []});
            }
            Json(body).into_response()
        }
        500 => (StatusCode::INTERNAL_SERVER_ERROR, "upstream down").into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn videos(Path(id): Path<u64>) -> Response {
    if id != 19995 {
        return StatusCode::NOT_FOUND.into_response();
    }
    Json(json!({
        "results": [
            {"key": "teaser", "site": "YouTube", "type": "Teaser", "official": true},
            {"key": "trailer", "site": "YouTube", "type": "Trailer", "official": true}
        ]
    }))
    .into_response()
}

async fn search(Query(params): Params) -> Json<serde_json::Value> {
    let results = match params.get("query").map(String::as_str) {
        Some("Avatar") => vec![avatar()],
        _ => Vec::new(),
    };
    Json(json!({ "page": 1, "results": results }))
}

async fn trending() -> Json<serde_json::Value> {
    let results: Vec<_> = (0..12).map(|i| json!({"id": i, "title": format!("Movie {}", i)})).collect();
    Json(json!({ "results": results }))
}

async fn spawn_fake() -> TmdbClient {
    let app = Router::new()
        .route("/movie/{id}", get(movie))
        .route("/movie/{id}/videos", get(videos))
        .route("/search/movie", get(search))
        .route("/trending/movie/week", get(trending));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    TmdbClient::new(API_KEY, format!("http://{}/", addr))
}

#[tokio::test]
async fn test_movie_details_by_id() {
    let client = spawn_fake().await;

    let details = client.movie_details(19995).await.unwrap().unwrap();

    assert_eq!(details.title, "Avatar");
    assert_eq!(details.poster_path.as_deref(), Some("/avatar.jpg"));
    assert_eq!(details.vote_count, 11800);
}

#[tokio::test]
async fn test_missing_movie_is_none() {
    let client = spawn_fake().await;
    assert!(client.movie_details(42).await.unwrap().is_none());
    assert!(client.movie(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_upstream_error_is_reported() {
    let client = spawn_fake().await;

    let err = client.movie_details(500).await.unwrap_err();

    assert!(matches!(err, TmdbError::Status { status: 500, .. }));
}

#[tokio::test]
async fn test_search_takes_first_result() {
    let client = spawn_fake().await;
    assert_eq!(client.search_movie("Avatar").await.unwrap().unwrap().id, 19995);
    assert!(client.search_movie("Nothing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_lookup_attaches_trailer() {
    let client = spawn_fake().await;

    let details = client.lookup(Some(19995), "Avatar").await.unwrap().unwrap();

    assert_eq!(
        details.trailer_url.as_deref(),
        Some("https://www.youtube.com/watch?v=trailer")
    );
}

#[tokio::test]
async fn test_trending_is_truncated() {
    let client = spawn_fake().await;
    assert_eq!(client.trending(10).await.unwrap().len(), 10);
}

#[tokio::test]
async fn test_full_movie_passthrough() {
    let client = spawn_fake().await;

    let movie = client.movie(19995).await.unwrap().unwrap();

    assert_eq!(movie["title"], "Avatar");
    assert!(movie.get("credits").is_some());
}
