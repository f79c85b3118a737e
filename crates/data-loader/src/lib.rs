//! # Data Loader Crate
//!
//! This crate owns the movie corpus on both ends of training: it reads the
//! source tables and it persists/loads the trained artifacts. It contains no
//! training logic, so a service can load a model without linking the
//! pipeline.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (SourceMovie, MovieRecord, MovieTable,
//!   SimilarityMatrix, TrainedModel, MetadataEntry)
//! - **parser**: Parse source CSV tables and structured metadata columns
//! - **index**: Title lookups over a MovieTable
//! - **artifacts**: Save/load the trained model pair
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::TrainedModel;
//! use std::path::Path;
//!
//! let model = TrainedModel::load(Path::new("models"))?;
//! let row = model.movies().resolve_title("avatar")?;
//! let scores = model.similarity().row(row).unwrap();
//! ```

// Public modules
pub mod artifacts;
pub mod error;
pub mod index;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use artifacts::{MOVIES_ARTIFACT, SIMILARITY_ARTIFACT};
pub use error::{DataLoadError, Result};
pub use parser::{parse_minimal_movies, parse_rich_movies, parse_structured_field};
pub use types::{
    // Type aliases
    MovieId,
    RowIndex,
    // Core types
    FieldKind,
    MetadataEntry,
    MovieRecord,
    MovieTable,
    SimilarityMatrix,
    SourceMovie,
    TrainedModel,
};
