// Error types for the content API client, the preview responder and the JSON API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

// Failures talking to the Listing Store (Sanity query API)
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("content API request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("content API returned status {0}")]
    Status(u16),
    #[error("content API response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

// Anything that can go wrong while building a preview page.
// None of these reach the caller: the responder maps every variant to the fallback page.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("listing lookup failed: {0}")]
    Store(#[from] StoreError),
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),
}

// Errors surfaced by the JSON API routes
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("internal error: {0}")]
    InternalServerError(anyhow::Error),
}

// Implement conversion from anyhow::Error for easier error propagation
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        AppError::InternalServerError(error)
    }
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        AppError::InternalServerError(error.into())
    }
}

// Implement IntoResponse for AppError to convert errors into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::NotFound(what) => {
                tracing::debug!("Not found: {}", what);
                (StatusCode::NOT_FOUND, format!("Not found: {}", what))
            }
            AppError::InternalServerError(e) => {
                // Log the detailed error here
                tracing::error!("Internal server error: {:?}", e);
                // Don't expose internal details to the client
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        (status, Json(json!({ "success": false, "error": error_message }))).into_response()
    }
}

// Define a custom Result type using our AppError
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_status_display() {
        let err = StoreError::Status(503);
        assert_eq!(err.to_string(), "content API returned status 503");
    }

    #[test]
    fn preview_error_wraps_store_error() {
        let err: PreviewError = StoreError::Status(500).into();
        assert_eq!(
            err.to_string(),
            "listing lookup failed: content API returned status 500"
        );
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::NotFound("car abc".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn internal_error_maps_to_500() {
        let response = AppError::from(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_error_becomes_internal_error() {
        let err = AppError::from(StoreError::Status(502));
        assert!(matches!(err, AppError::InternalServerError(_)));
    }
}
