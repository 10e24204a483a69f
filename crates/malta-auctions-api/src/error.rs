//! API error handling
//!
//! This module converts service errors into HTTP responses with appropriate
//! status codes and error messages.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use malta_auctions_service::ServiceError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// API error type that can be converted to HTTP responses
#[derive(Debug)]
pub struct ApiError {
    status_code: StatusCode,
    message: String,
    error_code: Option<String>,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status_code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            error_code: None,
        }
    }

    /// Create an API error with an error code
    pub fn with_code(
        status_code: StatusCode,
        message: impl Into<String>,
        error_code: impl Into<String>,
    ) -> Self {
        Self {
            status_code,
            message: message.into(),
            error_code: Some(error_code.into()),
        }
    }

    /// Create a bad request error (400)
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Create a not found error (404)
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Rejected asset payload (400)
    pub fn invalid_asset_data(detail: impl fmt::Display) -> Self {
        Self::with_code(
            StatusCode::BAD_REQUEST,
            format!("Invalid asset data: {}", detail),
            "INVALID_ASSET_DATA",
        )
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Error response JSON structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,

    /// Error message
    pub error: String,

    /// Optional error code for programmatic handling
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Timestamp of the error
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status_code.is_server_error() {
            tracing::error!(status = self.status_code.as_u16(), "{}", self.message);
        }

        let error_response = ErrorResponse {
            status: self.status_code.as_u16(),
            error: self.message,
            code: self.error_code,
            timestamp: chrono::Utc::now(),
        };

        (self.status_code, Json(error_response)).into_response()
    }
}

/// Convert ServiceError to ApiError
impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(msg) => {
                ApiError::with_code(StatusCode::NOT_FOUND, msg, "NOT_FOUND")
            }
            ServiceError::ValidationFailed(msg) => ApiError::invalid_asset_data(msg),
            ServiceError::InvalidInput(msg) => {
                ApiError::with_code(StatusCode::BAD_REQUEST, msg, "INVALID_INPUT")
            }
            ServiceError::Upstream(msg) => ApiError::with_code(
                StatusCode::BAD_GATEWAY,
                format!("Upstream source error: {}", msg),
                "UPSTREAM_ERROR",
            ),
            ServiceError::Unavailable(msg) => ApiError::with_code(
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Service unavailable: {}", msg),
                "SERVICE_UNAVAILABLE",
            ),
            ServiceError::Database(msg) => ApiError::with_code(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", msg),
                "DATABASE_ERROR",
            ),
            ServiceError::Configuration(msg) => ApiError::with_code(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Configuration error: {}", msg),
                "CONFIGURATION_ERROR",
            ),
            ServiceError::Internal(msg) => ApiError::with_code(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {}", msg),
                "INTERNAL_ERROR",
            ),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_asset_data(rejection.body_text())
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_creation() {
        let err = ApiError::bad_request("Invalid asset type");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid asset type");
    }

    #[test]
    fn test_service_error_conversion() {
        let api_err: ApiError = ServiceError::NotFound("asset-123".to_string()).into();
        assert_eq!(api_err.status_code(), StatusCode::NOT_FOUND);

        let api_err: ApiError = ServiceError::Upstream("timed out".to_string()).into();
        assert_eq!(api_err.status_code(), StatusCode::BAD_GATEWAY);

        let api_err: ApiError = ServiceError::Database("syntax error".to_string()).into();
        assert_eq!(api_err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let api_err: ApiError = ServiceError::Unavailable("pool closed".to_string()).into();
        assert_eq!(api_err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_validation_failure_is_bad_request() {
        let api_err: ApiError =
            ServiceError::ValidationFailed("description cannot be empty".to_string()).into();
        assert_eq!(api_err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            api_err.message(),
            "Invalid asset data: description cannot be empty"
        );
    }

    #[test]
    fn test_error_response_serialization() {
        let response = ErrorResponse {
            status: 404,
            error: "Asset not found".to_string(),
            code: Some("NOT_FOUND".to_string()),
            timestamp: chrono::Utc::now(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":404"));
        assert!(json.contains("\"error\":\"Asset not found\""));
    }
}
