use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use recommender::QueryError;
use serde_json::json;
use tmdb_client::TmdbError;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Recommender model not loaded")]
    ModelNotLoaded,

    #[error("Movie database error: {0}")]
    Upstream(#[from] TmdbError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<QueryError> for AppError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::NotFound(_) => AppError::NotFound(err.to_string()),
            QueryError::InvalidCount(_) => AppError::InvalidInput(err.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ModelNotLoaded => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
