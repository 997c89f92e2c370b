//! Response types for the JustTip API.
//!
//! This module defines the error response structures and the mapping from
//! engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Whether the same request may succeed if sent again.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub retryable: bool,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
            retryable: false,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(code, message)
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Marks the error as safe to retry.
    pub fn retryable(mut self) -> Self {
        self.retryable = true;
        self
    }
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Pairs an error body with a status code.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }

    /// A 400 response for a request that failed to deserialize.
    pub fn bad_request(error: ApiError) -> Self {
        Self::new(StatusCode::BAD_REQUEST, error)
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        let retryable = error.is_retryable();
        let (status, mut body) = match error {
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("CONFIG_ERROR", message),
            ),
            EngineError::InvalidRange { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_RANGE",
                    message,
                    "Shifts must have a start time strictly before the end time",
                ),
            ),
            EngineError::RetroactiveEdit { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::new("RETROACTIVE_EDIT", message),
            ),
            EngineError::EmployeeNotFound { .. } | EngineError::ShiftNotFound { .. } => {
                (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", message))
            }
            EngineError::OverlapConflict { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("OVERLAP_CONFLICT", message),
            ),
            EngineError::ConcurrencyConflict { .. } => (
                StatusCode::CONFLICT,
                ApiError::new("CONCURRENCY_CONFLICT", message),
            ),
            EngineError::InvalidTipAmount { .. } => (
                StatusCode::BAD_REQUEST,
                ApiError::with_details(
                    "INVALID_TIP_AMOUNT",
                    message,
                    "Tip amounts must be non-negative with at most two decimal places",
                ),
            ),
            EngineError::Storage { .. } => (
                StatusCode::SERVICE_UNAVAILABLE,
                ApiError::new("STORAGE_ERROR", message),
            ),
        };
        if retryable {
            body = body.retryable();
        }
        ApiErrorResponse::new(status, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 16).unwrap()
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
        assert!(!json.contains("retryable"));
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_status_codes() {
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        let cases = [
            (
                EngineError::InvalidRange { start: nine, end: nine },
                StatusCode::BAD_REQUEST,
                "INVALID_RANGE",
            ),
            (
                EngineError::RetroactiveEdit { date: date(), today: date() },
                StatusCode::BAD_REQUEST,
                "RETROACTIVE_EDIT",
            ),
            (
                EngineError::EmployeeNotFound { employee_id: 9 },
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                EngineError::ShiftNotFound { shift_id: 9 },
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
            ),
            (
                EngineError::OverlapConflict {
                    employee_id: 1,
                    date: date(),
                    start: nine,
                    end: nine,
                },
                StatusCode::CONFLICT,
                "OVERLAP_CONFLICT",
            ),
            (
                EngineError::Storage { message: "down".to_string() },
                StatusCode::SERVICE_UNAVAILABLE,
                "STORAGE_ERROR",
            ),
        ];

        for (error, status, code) in cases {
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.status, status);
            assert_eq!(response.error.code, code);
        }
    }

    #[test]
    fn test_concurrency_conflict_is_retryable() {
        let response: ApiErrorResponse = EngineError::ConcurrencyConflict {
            employee_id: 1,
            date: date(),
        }
        .into();

        assert_eq!(response.status, StatusCode::CONFLICT);
        assert!(response.error.retryable);
        let json = serde_json::to_string(&response.error).unwrap();
        assert!(json.contains("\"retryable\":true"));
    }

    #[test]
    fn test_retryable_flag_follows_engine_error() {
        let errors = [
            EngineError::ConcurrencyConflict { employee_id: 1, date: date() },
            EngineError::Storage { message: "down".to_string() },
            EngineError::InvalidTipAmount { date: date(), amount: rust_decimal::Decimal::MAX },
            EngineError::ShiftNotFound { shift_id: 3 },
        ];

        for error in errors {
            let expected = error.is_retryable();
            let response: ApiErrorResponse = error.into();
            assert_eq!(response.error.retryable, expected, "{}", response.error.code);
        }
    }

    #[test]
    fn test_storage_error_is_not_retryable() {
        let response: ApiErrorResponse =
            EngineError::Storage { message: "down".to_string() }.into();

        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(!response.error.retryable);
        let json = serde_json::to_string(&response.error).unwrap();
        assert!(!json.contains("retryable"));
    }
}
