//! Response shapes for the movie database API.

use serde::{Deserialize, Serialize};

/// Movie database identifier
pub type TmdbId = u64;

const YOUTUBE_WATCH_URL: &str = "https://www.youtube.com/watch?v=";

/// Movie as returned by `/movie/{id}` and `/search/movie`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TmdbMovie {
    pub id: TmdbId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: u64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

/// One entry of `/movie/{id}/videos`
#[derive(Debug, Clone, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub official: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VideosResponse {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Enrichment payload attached to a recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieDetails {
    pub id: TmdbId,
    pub title: String,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: f64,
    pub vote_count: u64,
    pub trailer_url: Option<String>,
}

impl From<TmdbMovie> for MovieDetails {
    fn from(movie: TmdbMovie) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            overview: movie.overview,
            poster_path: movie.poster_path.filter(|p| !p.is_empty()),
            release_date: movie.release_date,
            vote_average: movie.vote_average,
            vote_count: movie.vote_count,
            trailer_url: None,
        }
    }
}

impl MovieDetails {
    pub fn has_poster(&self) -> bool {
        self.poster_path.is_some()
    }
}

fn is_youtube_trailer(video: &Video) -> bool {
    video.site == "YouTube" && video.kind == "Trailer"
}

/// Pick the trailer to link: an official YouTube trailer if there is one,
/// else the first YouTube trailer.
pub fn pick_trailer(videos: &[Video]) -> Option<String> {
    videos
        .iter()
        .find(|v| is_youtube_trailer(v) && v.official)
        .or_else(|| videos.iter().find(|v| is_youtube_trailer(v)))
        .map(|v| format!("{}{}", YOUTUBE_WATCH_URL, v.key))
}
