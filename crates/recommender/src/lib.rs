//! Serving-side recommendation query.
//!
//! Given a trained model and an [`Enricher`], answers "movies like X":
//! resolve the title, rank the similarity row, and enrich candidates until
//! enough are accepted.
//!
//! ## Example Usage
//! ```ignore
//! use recommender::{Recommender, TmdbEnricher};
//!
//! let recommender = Recommender::new(model, TmdbEnricher::new(source));
//! let set = recommender.recommend("avatar", 5).await?;
//! ```

pub mod enrich;
pub mod error;
pub mod query;
pub mod ranking;

pub use enrich::{Enricher, OfflineEnricher, TmdbEnricher};
pub use error::{QueryError, Result};
pub use query::{
    DEFAULT_COUNT, DEFAULT_MAX_ATTEMPTS, Recommendation, RecommendationSet, Recommender,
};
pub use ranking::{Candidate, rank_candidates};
