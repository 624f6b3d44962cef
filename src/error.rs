use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application error types. Only these cross the HTTP boundary; per-provider
/// failures are absorbed inside the resolvers.
#[derive(Error, Debug)]
pub enum AppError {
    /// Requested metal outside {gold, silver, platinum}.
    #[error("invalid metal symbol")]
    InvalidMetal,

    /// Malformed start/end date on a historical request.
    #[error("invalid date range")]
    InvalidDate,

    /// Every configured provider exhausted and no cached value available.
    #[error("no price resolved")]
    NoPrice,

    /// Unexpected orchestration failure.
    #[error("internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::InvalidMetal => (StatusCode::BAD_REQUEST, "invalid_metal"),
            AppError::InvalidDate => (StatusCode::BAD_REQUEST, "invalid_date"),
            AppError::NoPrice => (StatusCode::BAD_GATEWAY, "no_price"),
            AppError::Internal(_) | AppError::Anyhow(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "server_error")
            }
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }

        let body = Json(json!({ "error": code }));
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
