//! Offline training pipeline for the content-based recommender.
//!
//! This crate provides:
//! - TagBuilder trait with the minimal and rich tag strategies
//! - CountVectorizer for bag-of-words vectors with stop-word removal
//! - Cosine similarity over all pairs of movies
//! - Trainer for composing the stages into a `TrainedModel`
//!
//! ## Architecture
//! Training runs in stages:
//! 1. A TagBuilder turns each source row into a text tag
//! 2. The vectorizer maps tags to count vectors over a bounded vocabulary
//! 3. Pairwise cosine similarity produces the N x N matrix
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{RichTags, Trainer};
//! use data_loader::parse_rich_movies;
//!
//! let rows = parse_rich_movies(movies_csv, credits_csv)?;
//! let model = Trainer::new(RichTags::new()).train(rows)?;
//! model.save(Path::new("models"))?;
//! ```

pub mod similarity;
pub mod stop_words;
pub mod tags;
pub mod trainer;
pub mod traits;
pub mod vectorizer;

// Re-export main types
pub use similarity::cosine_similarity;
pub use tags::{MinimalTags, RichTags};
pub use trainer::Trainer;
pub use traits::TagBuilder;
pub use vectorizer::{CountMatrix, CountVectorizer, DEFAULT_MAX_FEATURES, Vocabulary};
