//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use taskhub_domain::error::TaskHubError;

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps [`TaskHubError`] to an HTTP response with appropriate status code.
pub struct ApiError(TaskHubError);

impl From<TaskHubError> for ApiError {
    fn from(err: TaskHubError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            TaskHubError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            TaskHubError::NotFound(err) => (StatusCode::NOT_FOUND, err.to_string()),
            TaskHubError::Forbidden(reason) => (StatusCode::FORBIDDEN, (*reason).to_string()),
            TaskHubError::Storage(err) => {
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
