//! Mapping of crate errors onto HTTP responses.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::error;

use crate::error::Error;

/// Error returned by API handlers.
///
/// Missing students become 404, rejected input 400, and everything else 500.
/// The body is always `{"error": "..."}`.
#[derive(Debug)]
pub struct ApiError(pub Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::StudentNotFound { .. } => {
                (StatusCode::NOT_FOUND, "Student not found".to_string())
            }
            Error::InvalidInput { message } => (StatusCode::BAD_REQUEST, message.clone()),
            other => {
                error!(error = %other, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, other.to_string())
            }
        };
        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(Error::invalid_input(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self(Error::invalid_input(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(Error::invalid_input(rejection.body_text()))
    }
}
