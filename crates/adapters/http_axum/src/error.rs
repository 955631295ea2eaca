//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use ringflow_domain::error::RingflowError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`RingflowError`] to an HTTP response with appropriate status code.
pub struct ApiError(RingflowError);

impl From<RingflowError> for ApiError {
    fn from(err: RingflowError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            RingflowError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            RingflowError::UnknownTrigger(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            RingflowError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            RingflowError::Storage(err) => {
                tracing::error!(error = %err, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

/// Build a bare JSON error response, for errors that never pass through
/// [`RingflowError`] (tenant header, scheduler signals).
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}
