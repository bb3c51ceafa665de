use crate::libs::messages::Message;
use crate::msg_error;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures that end a request without a redirect.
#[derive(Debug, Error)]
pub enum AppError {
    /// A path-embedded id matched no record.
    #[error("not found")]
    NotFound,
    /// Missing or invalid anti-forgery token.
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Persistence or rendering failure.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
            AppError::Forbidden(reason) => (StatusCode::FORBIDDEN, format!("403 Forbidden: {}", reason)).into_response(),
            AppError::BadRequest(reason) => (StatusCode::BAD_REQUEST, format!("400 Bad Request: {}", reason)).into_response(),
            AppError::Internal(e) => {
                msg_error!(Message::RequestFailed(format!("{:#}", e)));
                (StatusCode::INTERNAL_SERVER_ERROR, "500 Internal Server Error").into_response()
            }
        }
    }
}
