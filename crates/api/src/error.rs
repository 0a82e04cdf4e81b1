//! JSON error responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use famwallet_shared::AppError;
use serde_json::json;
use tracing::{error, warn};

/// An [`AppError`] rendered as `{"error": CODE, "message": text}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Server-side details stay in the log.
        let message = if self.0.is_server_error() {
            error!(error = %self.0, "Request failed");
            "An error occurred".to_string()
        } else {
            warn!(status = status.as_u16(), error = %self.0, "Request rejected");
            self.0.message().to_string()
        };

        (
            status,
            Json(json!({
                "error": self.0.error_code(),
                "message": message,
            })),
        )
            .into_response()
    }
}
