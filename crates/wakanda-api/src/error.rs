//! API error handling
//!
//! Every error leaves the server as `{"error": <message>}` with a fixed message
//! per failure kind.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Returned when `character` or `question` is missing or empty
pub const MISSING_FIELDS_MESSAGE: &str = "Character and question are required.";

/// Returned when the POST body is not a JSON object with string fields
pub const INVALID_BODY_MESSAGE: &str = "Invalid request body.";

/// Returned by the JSON body route when the answer chain fails
pub const BODY_FAILURE_MESSAGE: &str = "An error occurred while processing the request";

/// Returned by the query string route when the answer chain fails
pub const QUERY_FAILURE_MESSAGE: &str = "Internal server error";

/// API error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human-readable message
    #[schema(example = "Character and question are required.")]
    pub error: String,
}

impl ApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    BadRequest(String),
    NotFound,
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ApiError::new(msg)),
            AppError::NotFound => (StatusCode::NOT_FOUND, ApiError::new("Not found")),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, ApiError::new(msg)),
        };

        (status, Json(error)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_bad_request_shape() {
        let response = AppError::BadRequest(MISSING_FIELDS_MESSAGE.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Character and question are required." })
        );
    }

    #[tokio::test]
    async fn test_internal_error_has_only_message() {
        let response = AppError::Internal(QUERY_FAILURE_MESSAGE.to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "error": "Internal server error" })
        );
    }

    #[tokio::test]
    async fn test_not_found_shape() {
        let response = AppError::NotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"], "Not found");
    }
}
