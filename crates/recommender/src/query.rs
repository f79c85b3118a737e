//! # Recommendation Query
//!
//! Answers "movies like X" against a trained model:
//! 1. Resolve the query to the first title containing it (case-insensitive)
//! 2. Rank every other movie by similarity to the resolved one
//! 3. Walk the ranking, enriching each candidate, until `count` are accepted
//!    or the attempt cap is reached
//!
//! The model is shared read-only; nothing is retained between queries.

use std::sync::Arc;
use std::time::Instant;

use data_loader::{MovieId, RowIndex, TrainedModel};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::enrich::Enricher;
use crate::error::{QueryError, Result};
use crate::ranking::rank_candidates;

/// Maximum ranked candidates examined per query
pub const DEFAULT_MAX_ATTEMPTS: usize = 20;

/// Count used when the caller does not ask for one
pub const DEFAULT_COUNT: usize = 5;

/// One accepted recommendation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation<P> {
    pub index: RowIndex,
    pub id: Option<MovieId>,
    pub title: String,
    pub score: f32,
    pub payload: P,
}

/// Result of a query: the title the query resolved to plus the accepted
/// recommendations, best first
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationSet<P> {
    pub resolved_title: String,
    pub recommendations: Vec<Recommendation<P>>,
}

#[derive(Clone)]
pub struct Recommender<E> {
    model: Arc<TrainedModel>,
    enricher: E,
    max_attempts: usize,
}

impl<E: Enricher> Recommender<E> {
    pub fn new(model: Arc<TrainedModel>, enricher: E) -> Self {
        Self {
            model,
            enricher,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    /// Configure the attempt cap (default: 20)
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn model(&self) -> &TrainedModel {
        &self.model
    }

    /// Recommend up to `count` movies similar to the first title matching
    /// `query`.
    ///
    /// Candidates the enricher rejects or fails on are skipped; each one
    /// still counts toward the attempt cap, so the result may hold fewer
    /// than `count` entries.
    #[instrument(skip(self), fields(max_attempts = self.max_attempts))]
    pub async fn recommend(
        &self,
        query: &str,
        count: usize,
    ) -> Result<RecommendationSet<E::Payload>> {
        if count == 0 {
            return Err(QueryError::InvalidCount(count));
        }
        let start_time = Instant::now();

        let movies = self.model.movies();
        let target = movies
            .find_first_match(query)
            .ok_or_else(|| QueryError::NotFound(query.to_string()))?;
        let resolved_title = movies
            .get(target)
            .map(|m| m.title.clone())
            .ok_or_else(|| QueryError::NotFound(query.to_string()))?;
        let row = self
            .model
            .similarity()
            .row(target)
            .ok_or_else(|| QueryError::NotFound(query.to_string()))?;
        info!("Resolved \"{}\" to \"{}\" (row {})", query, resolved_title, target);

        // `count` is caller-controlled; at most `max_attempts` can be accepted
        let mut recommendations = Vec::with_capacity(count.min(self.max_attempts));
        let mut attempts = 0;
        for candidate in rank_candidates(row, target) {
            if recommendations.len() >= count || attempts >= self.max_attempts {
                break;
            }
            attempts += 1;

            let Some(movie) = movies.get(candidate.index) else {
                continue;
            };
            match self.enricher.enrich(movie).await {
                Ok(Some(payload)) => recommendations.push(Recommendation {
                    index: candidate.index,
                    id: movie.id,
                    title: movie.title.clone(),
                    score: candidate.score,
                    payload,
                }),
                Ok(None) => debug!(title = %movie.title, "Candidate rejected by enricher"),
                Err(e) => warn!(title = %movie.title, error = %e, "Enrichment failed, skipping"),
            }
        }

        info!(
            "Accepted {} of {} requested after {} attempts in {:.2?}",
            recommendations.len(),
            count,
            attempts,
            start_time.elapsed()
        );
        Ok(RecommendationSet {
            resolved_title,
            recommendations,
        })
    }
}
