//! HTTP surface for the movie recommender.
//!
//! Serves recommendations and title search from a trained model, and passes
//! trending and detail lookups through to the movie database.

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{Config, ConfigError};
pub use error::{AppError, AppResult};
pub use routes::create_router;
pub use state::{AppState, load_model};
