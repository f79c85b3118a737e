//! Error types for the data-loader crate.
//!
//! Every failure the loader can hit while reading source tables, parsing
//! structured metadata or moving trained artifacts to and from disk is a
//! variant of [`DataLoadError`].
//!
//! Rust error handling concepts used here:
//! - thiserror derives `Display` and `std::error::Error` from `#[error(...)]`
//! - `#[from]` lets `?` convert foreign errors (io, csv) automatically
//! - Struct-like variants carry the context a caller needs to report a failure

use thiserror::Error;

/// Errors that can occur during data loading and parsing
///
/// Rust concept: one enum covers the whole crate, so callers match on the
/// variant they care about and let the rest propagate with `?`. Higher layers
/// (the pipeline trainer, the CLI) wrap it in `anyhow` with extra context.
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a file
    ///
    /// Rust concept: `#[from]` generates `From<std::io::Error>`, which is
    /// what makes `File::create(path)?` work inside a function returning
    /// our `Result`.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The CSV reader rejected a record (bad quoting, unreadable bytes)
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Line in a source table couldn't be parsed
    ///
    /// `line` comes from the CSV reader: 1-based with the header counted, so
    /// it matches what an editor shows. It is 0 when the reader has no position.
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A serialized list-of-objects column did not have the expected shape.
    ///
    /// Tag building recovers from this by substituting an empty list.
    #[error("Malformed structured field {field}: {reason}")]
    MalformedStructuredField { field: String, reason: String },

    /// Encoding or decoding a persisted artifact failed
    ///
    /// This also covers artifacts that decode but describe an impossible
    /// value, such as a similarity buffer that is not `dim * dim` long.
    #[error("Artifact error in {path}: {reason}")]
    ArtifactError { path: String, reason: String },

    /// The two persisted artifacts do not describe the same corpus
    #[error("Artifact mismatch: table has {table_rows} rows but matrix is {matrix_dim}x{matrix_dim}")]
    ArtifactMismatch { table_rows: usize, matrix_dim: usize },

    /// No movie title matched a lookup
    #[error("No movie matching '{0}'")]
    NotFound(String),

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
///
/// Rust concept: the alias fixes the error type, so signatures read
/// `Result<MovieTable>` instead of `Result<MovieTable, DataLoadError>`.
pub type Result<T> = std::result::Result<T, DataLoadError>;
