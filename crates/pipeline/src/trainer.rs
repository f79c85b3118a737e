//! # Training Pipeline
//!
//! Coordinates one offline training run:
//! 1. Build the movie table (tags) from source rows
//! 2. Fit the count vectorizer over all tags
//! 3. Compute the all-pairs cosine similarity matrix
//! 4. Pair table and matrix into a `TrainedModel`
//!
//! Persisting the result is left to the caller (`TrainedModel::save`).

use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::similarity::cosine_similarity;
use crate::traits::TagBuilder;
use crate::vectorizer::CountVectorizer;
use data_loader::{SourceMovie, TrainedModel};

/// Offline trainer, configured with one tag strategy
pub struct Trainer {
    tag_builder: Box<dyn TagBuilder>,
    vectorizer: CountVectorizer,
}

impl Trainer {
    /// Create a trainer with the default vocabulary cap (5000)
    pub fn new(tag_builder: impl TagBuilder + 'static) -> Self {
        Self {
            tag_builder: Box::new(tag_builder),
            vectorizer: CountVectorizer::new(),
        }
    }

    pub fn with_max_features(mut self, max_features: usize) -> Self {
        self.vectorizer = self.vectorizer.with_max_features(max_features);
        self
    }

    pub fn tag_builder_name(&self) -> &str {
        self.tag_builder.name()
    }

    /// Run the full training pipeline over parsed source rows
    #[instrument(skip(self, rows), fields(builder = self.tag_builder.name(), input_rows = rows.len()))]
    pub fn train(&self, rows: Vec<SourceMovie>) -> Result<TrainedModel> {
        let start_time = Instant::now();

        let movies = self.tag_builder.build_table(rows);
        let tags: Vec<&str> = movies.tags().collect();

        let (vocabulary, counts) = self.vectorizer.fit_transform(&tags);
        info!(
            "Fitted vocabulary of {} terms in {:.2?}",
            vocabulary.len(),
            start_time.elapsed()
        );

        let similarity =
            cosine_similarity(&counts).context("Failed to build similarity matrix")?;
        let model = TrainedModel::new(movies, similarity)
            .context("Movie table and similarity matrix disagree")?;

        info!(
            "Trained model over {} movies in {:.2?}",
            model.movies().len(),
            start_time.elapsed()
        );
        Ok(model)
    }
}
