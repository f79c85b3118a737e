use thiserror::Error;

/// User-visible failures of a recommendation query
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Movie \"{0}\" not found in our dataset")]
    NotFound(String),

    #[error("Recommendation count must be at least 1, got {0}")]
    InvalidCount(usize),
}

pub type Result<T> = std::result::Result<T, QueryError>;
