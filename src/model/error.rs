use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{error, warn};
use serde::Serialize;

/// The error taxonomy the handlers speak. Each variant carries the message
/// the client will see; storage detail never leaves the server log.
#[derive(Debug)]
pub enum ApiError {
    InputFailedValidation(String),
    Unauthorized(String),
    NotFound(String),
    PathNotFound(String),
    InternalError(String),
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    message: String,
}

impl From<rusqlite::Error> for ApiError {
    fn from(value: rusqlite::Error) -> ApiError {
        error!("storage error: {}", value);
        ApiError::InternalError(String::from("Internal Error"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            Self::InputFailedValidation(message) => (StatusCode::BAD_REQUEST, message),
            Self::Unauthorized(message) => (StatusCode::UNAUTHORIZED, message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message),
            Self::PathNotFound(path) => (
                StatusCode::NOT_FOUND,
                format!("Requested path '{}' not found", path),
            ),
            Self::InternalError(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!("{} response with message={}", status_code, message);

        (status_code, Json(ErrorResponse { message })).into_response()
    }
}
