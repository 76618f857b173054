//! Error handling integration tests
//!
//! Tests that errors render to the HTTP responses clients rely on.

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;
    use actix_web::body::to_bytes;
    use actix_web::http::header::RETRY_AFTER;
    use resource_guard::GuardError;
    use resource_guard::utils::error::ErrorResponse;

    async fn body(error: &GuardError) -> ErrorResponse {
        let bytes = to_bytes(error.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    /// Test the concurrency rejection response
    #[actix_web::test]
    async fn test_too_many_concurrent_response() {
        let error = GuardError::too_many_concurrent();
        let response = error.error_response();

        assert_eq!(response.status().as_u16(), 429);
        assert_eq!(response.headers().get(RETRY_AFTER).unwrap(), "30");

        let body = body(&error).await;
        assert_eq!(body.error.code, "RATE_LIMIT_EXCEEDED");
        assert_eq!(body.error.reason.as_deref(), Some("too_many_concurrent_operations"));
        assert_eq!(body.error.retry_after, Some(30));
    }

    /// Test the execution timeout response
    #[actix_web::test]
    async fn test_timeout_response() {
        let error = GuardError::timeout("slow");
        assert_eq!(error.error_response().status().as_u16(), 503);
        assert_eq!(
            body(&error).await.error.reason.as_deref(),
            Some("execution_timeout")
        );
    }

    /// Test that connectivity and validation errors keep their status
    #[test]
    fn test_status_mapping() {
        assert_eq!(GuardError::connectivity("down").status_code().as_u16(), 503);
        assert_eq!(GuardError::validation("bad").status_code().as_u16(), 400);
        assert_eq!(GuardError::config("bad").status_code().as_u16(), 500);
    }

    /// Test that internal details stay out of the response
    #[actix_web::test]
    async fn test_internal_error_is_generic() {
        let error = GuardError::internal("secret connection string");
        let body = body(&error).await;

        assert_eq!(body.error.code, "INTERNAL_ERROR");
        assert!(!body.error.message.contains("secret"));
        assert!(body.error.reason.is_none());
    }
}
