use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// First rule a write payload violates.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("'{0}' is required")]
    MissingField(&'static str),

    #[error("Request body must contain either 'title', 'url', 'rating' or 'description'")]
    EmptyUpdate,

    #[error("'rating' must be a number between 1 and 5")]
    InvalidRating,

    #[error("'url' must be a valid URL")]
    InvalidUrl,
}

/// Error type returned by the HTTP handlers.
///
/// Client faults are shaped here; storage faults carry the underlying error
/// so it can be logged, but only a generic message reaches the client.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Bookmark not found")]
    NotFound,

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorResponse {
            error: ErrorBody {
                message: message.into(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            AppError::MalformedBody(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            AppError::Storage(e) => {
                let err: &(dyn std::error::Error + Send + Sync + 'static) = e.as_ref();
                tracing::error!(error = %crate::unpack_error(err), "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}
