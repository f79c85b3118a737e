use thiserror::Error;

/// Errors talking to the movie database
#[derive(Error, Debug)]
pub enum TmdbError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Movie database returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Invalid response from movie database: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, TmdbError>;
