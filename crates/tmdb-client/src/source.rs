//! The enrichment seam.
//!
//! Everything above this crate talks to a [`MetadataSource`], so tests and
//! offline tools can swap in a fake without touching the network.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use crate::types::{MovieDetails, TmdbId};

/// External movie metadata provider
///
/// Lookups return `Ok(None)` when the provider has no record and `Err` for
/// every other failure; callers decide whether an error is fatal.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;

    /// Fetch a movie by its provider id
    async fn movie_details(&self, id: TmdbId) -> Result<Option<MovieDetails>>;

    /// Search by title and return the first hit
    async fn search_movie(&self, title: &str) -> Result<Option<MovieDetails>>;

    /// Resolve the trailer link for a movie, if it has one
    async fn trailer_url(&self, id: TmdbId) -> Result<Option<String>>;

    /// Trending movies this week, passed through untouched
    async fn trending(&self, limit: usize) -> Result<Vec<Value>>;

    /// Full movie record with credits, videos and images, passed through
    async fn movie(&self, id: TmdbId) -> Result<Option<Value>>;

    /// Look a movie up by id when known, otherwise by title, and attach its
    /// trailer.
    ///
    /// A failed trailer lookup leaves `trailer_url` empty rather than
    /// failing the whole lookup.
    async fn lookup(&self, id: Option<TmdbId>, title: &str) -> Result<Option<MovieDetails>> {
        let found = match id {
            Some(id) => self.movie_details(id).await?,
            None => self.search_movie(title).await?,
        };
        let Some(mut details) = found else {
            debug!(title, ?id, source = self.name(), "No metadata record");
            return Ok(None);
        };

        details.trailer_url = match self.trailer_url(details.id).await {
            Ok(url) => url,
            Err(e) => {
                warn!(movie_id = details.id, error = %e, "Trailer lookup failed");
                None
            }
        };
        Ok(Some(details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TmdbError;

    /// Knows one movie (id 1, "Heat"); trailer lookups always fail
    struct OneMovie;

    fn heat() -> MovieDetails {
        MovieDetails {
            id: 1,
            title: "Heat".to_string(),
            overview: None,
            poster_path: Some("/heat.jpg".to_string()),
            release_date: None,
            vote_average: 7.9,
            vote_count: 100,
            trailer_url: None,
        }
    }

    #[async_trait]
    impl MetadataSource for OneMovie {
        fn name(&self) -> &'static str {
            "one-movie"
        }

        async fn movie_details(&self, id: TmdbId) -> Result<Option<MovieDetails>> {
            Ok((id == 1).then(heat))
        }

        async fn search_movie(&self, title: &str) -> Result<Option<MovieDetails>> {
            Ok((title == "Heat").then(heat))
        }

        async fn trailer_url(&self, _id: TmdbId) -> Result<Option<String>> {
            Err(TmdbError::InvalidResponse("boom".to_string()))
        }

        async fn trending(&self, _limit: usize) -> Result<Vec<Value>> {
            Ok(Vec::new())
        }

        async fn movie(&self, _id: TmdbId) -> Result<Option<Value>> {
            Ok(None)
        }
    }

    #[tokio::test]
    async fn test_lookup_prefers_id() {
        // The title would miss, but the id is used instead
        let found = OneMovie.lookup(Some(1), "Something Else").await.unwrap();
        assert_eq!(found.unwrap().title, "Heat");
    }

    #[tokio::test]
    async fn test_lookup_falls_back_to_title() {
        assert!(OneMovie.lookup(None, "Heat").await.unwrap().is_some());
        assert!(OneMovie.lookup(None, "Ronin").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_trailer_failure_is_not_fatal() {
        let found = OneMovie.lookup(Some(1), "Heat").await.unwrap().unwrap();
        assert_eq!(found.trailer_url, None);
    }
}
