//! Per-candidate enrichment step.
//!
//! An [`Enricher`] decides whether a ranked candidate can be shown and, if
//! so, what payload travels with it.

use std::sync::Arc;

use async_trait::async_trait;
use data_loader::MovieRecord;
use tmdb_client::{MetadataSource, MovieDetails, TmdbError};
use tracing::debug;

/// Completes a candidate for display.
///
/// `Ok(None)` rejects the candidate; `Err` is a transient failure. Both are
/// skipped by the query and count as an attempt.
#[async_trait]
pub trait Enricher: Send + Sync {
    type Payload: Send;

    async fn enrich(&self, movie: &MovieRecord) -> Result<Option<Self::Payload>, TmdbError>;
}

/// Accepts every candidate with no payload; used when no metadata source is
/// configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineEnricher;

#[async_trait]
impl Enricher for OfflineEnricher {
    type Payload = ();

    async fn enrich(&self, _movie: &MovieRecord) -> Result<Option<()>, TmdbError> {
        Ok(Some(()))
    }
}

/// Looks candidates up in the movie database and keeps only those with a
/// poster.
#[derive(Clone)]
pub struct TmdbEnricher {
    source: Arc<dyn MetadataSource>,
}

impl TmdbEnricher {
    pub fn new(source: Arc<dyn MetadataSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl Enricher for TmdbEnricher {
    type Payload = MovieDetails;

    async fn enrich(&self, movie: &MovieRecord) -> Result<Option<MovieDetails>, TmdbError> {
        let details = self.source.lookup(movie.id, &movie.title).await?;
        Ok(details.filter(|d| {
            if !d.has_poster() {
                debug!(title = %movie.title, "Skipping candidate without a poster");
            }
            d.has_poster()
        }))
    }
}
