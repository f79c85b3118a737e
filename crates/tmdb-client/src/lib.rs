//! Client for the external movie database used to enrich recommendations
//! with posters, ratings and trailers.
//!
//! [`MetadataSource`] is the seam the recommender and server depend on;
//! [`TmdbClient`] is the HTTP implementation.

pub mod client;
pub mod error;
pub mod source;
pub mod types;

pub use client::{DEFAULT_API_URL, TmdbClient};
pub use error::{Result, TmdbError};
pub use source::MetadataSource;
pub use types::{MovieDetails, TmdbId, TmdbMovie, Video, pick_trailer};
