//! HTTP response handling for errors

use super::types::GuardError;
use actix_web::http::StatusCode;
use actix_web::http::header::RETRY_AFTER;
use actix_web::{HttpResponse, ResponseError};

impl ResponseError for GuardError {
    fn status_code(&self) -> StatusCode {
        match self {
            GuardError::RateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
            GuardError::Validation(_) => StatusCode::BAD_REQUEST,
            GuardError::Connectivity(_) | GuardError::Timeout(_) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message, reason, retry_after) = match self {
            GuardError::RateLimit {
                message,
                reason,
                retry_after,
            } => (
                "RATE_LIMIT_EXCEEDED",
                message.clone(),
                Some(reason.to_string()),
                Some(*retry_after),
            ),
            GuardError::Validation(_) => ("VALIDATION_ERROR", self.to_string(), None, None),
            GuardError::Connectivity(_) => ("CONNECTIVITY_ERROR", self.to_string(), None, None),
            GuardError::Timeout(_) => (
                "TIMEOUT",
                self.to_string(),
                Some("execution_timeout".to_string()),
                None,
            ),
            // Everything else is unexpected: keep the details in the logs only
            _ => (
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
                None,
                None,
            ),
        };

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code: error_code.to_string(),
                message,
                reason,
                retry_after,
                timestamp: chrono::Utc::now().timestamp(),
            },
        };

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(seconds) = retry_after {
            builder.insert_header((RETRY_AFTER, seconds.to_string()));
        }
        builder.json(error_response)
    }
}

/// Standard error response format
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

/// Error detail structure
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
    pub timestamp: i64,
}
