//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use homedash_domain::error::{HomeDashError, NotFoundError, ValidationError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`HomeDashError`] to an HTTP response with appropriate status code.
#[derive(Debug)]
pub struct ApiError(HomeDashError);

impl From<HomeDashError> for ApiError {
    fn from(err: HomeDashError) -> Self {
        Self(err)
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self(err.into())
    }
}

impl From<NotFoundError> for ApiError {
    fn from(err: NotFoundError) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            HomeDashError::Validation(_) => StatusCode::BAD_REQUEST,
            HomeDashError::NotFound(_) => StatusCode::NOT_FOUND,
            HomeDashError::ControlMode(_) => StatusCode::CONFLICT,
        };
        let body = ErrorBody {
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
