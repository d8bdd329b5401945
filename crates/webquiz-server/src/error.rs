use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use webquiz_core::error::AppError;

use crate::dto::ErrorResponse;

/// Wrapper so we can implement `IntoResponse` for `AppError`.
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self.0 {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            // Unique-constraint violations surface as 400 on this API.
            AppError::Conflict(_) => (StatusCode::BAD_REQUEST, "conflict"),
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "unauthorized"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::Database(_) | AppError::Config(_) | AppError::Hash(_)
            | AppError::Token(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal_error"),
        };

        // The underlying cause of a server-side failure is logged, never
        // exposed to the caller.
        let message = if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
        };

        (status, axum::Json(body)).into_response()
    }
}
