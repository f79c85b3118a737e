//! HTTP client for the movie database REST API (v3).
//!
//! API flow:
//! 1. Details: `/movie/{id}` (404 means no record)
//! 2. Fallback search: `/search/movie?query=...`, first result wins
//! 3. Trailer: `/movie/{id}/videos`
//!
//! Every request carries `api_key` and `language=en-US`.

use async_trait::async_trait;
use reqwest::{Client as HttpClient, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{Result, TmdbError};
use crate::source::MetadataSource;
use crate::types::{
    ListResponse, MovieDetails, SearchResponse, TmdbId, TmdbMovie, VideosResponse, pick_trailer,
};

/// Default API root
pub const DEFAULT_API_URL: &str = "https://api.themoviedb.org/3";

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl TmdbClient {
    pub fn new(api_key: impl Into<String>, api_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: api_key.into(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Issue a GET against `path` with the common query parameters
    async fn get(&self, path: &str, extra: &[(&str, &str)]) -> Result<Response> {
        let url = format!("{}{}", self.api_url, path);
        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)])
            .query(extra)
            .send()
            .await?;
        debug!(path, status = response.status().as_u16(), "Movie database response");
        Ok(response)
    }

    /// Decode a successful body; 404 becomes `None`, other statuses an error
    async fn decode<T: DeserializeOwned>(response: Response) -> Result<Option<T>> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TmdbError::Status {
                status: status.as_u16(),
                body,
            });
        }
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| TmdbError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl MetadataSource for TmdbClient {
    fn name(&self) -> &'static str {
        "tmdb"
    }

    #[instrument(skip(self))]
    async fn movie_details(&self, id: TmdbId) -> Result<Option<MovieDetails>> {
        let response = self.get(&format!("/movie/{}", id), &[]).await?;
        let movie: Option<TmdbMovie> = Self::decode(response).await?;
        Ok(movie.map(MovieDetails::from))
    }

    #[instrument(skip(self))]
    async fn search_movie(&self, title: &str) -> Result<Option<MovieDetails>> {
        let response = self
            .get("/search/movie", &[("query", title), ("page", "1")])
            .await?;
        let search: Option<SearchResponse> = Self::decode(response).await?;
        Ok(search
            .and_then(|s| s.results.into_iter().next())
            .map(MovieDetails::from))
    }

    async fn trailer_url(&self, id: TmdbId) -> Result<Option<String>> {
        let response = self.get(&format!("/movie/{}/videos", id), &[]).await?;
        let videos: Option<VideosResponse> = Self::decode(response).await?;
        Ok(videos.and_then(|v| pick_trailer(&v.results)))
    }

    #[instrument(skip(self))]
    async fn trending(&self, limit: usize) -> Result<Vec<Value>> {
        let response = self.get("/trending/movie/week", &[]).await?;
        let list: Option<ListResponse> = Self::decode(response).await?;
        let mut movies = list
            .ok_or_else(|| TmdbError::InvalidResponse("trending list not found".to_string()))?
            .results;
        movies.truncate(limit);
        Ok(movies)
    }

    #[instrument(skip(self))]
    async fn movie(&self, id: TmdbId) -> Result<Option<Value>> {
        let response = self
            .get(
                &format!("/movie/{}", id),
                &[("append_to_response", "credits,videos,images")],
            )
            .await?;
        Self::decode(response).await
    }
}
