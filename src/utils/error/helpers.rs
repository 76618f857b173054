//! Helper functions for creating specific error types

use super::types::GuardError;

/// Retry hint returned with concurrency rejections, in seconds
pub const CONCURRENCY_RETRY_AFTER_SECS: u64 = 30;

impl GuardError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    pub fn connectivity<S: Into<String>>(message: S) -> Self {
        Self::Connectivity(message.into())
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    pub fn timeout<S: Into<String>>(message: S) -> Self {
        Self::Timeout(message.into())
    }

    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Rejection from the per-client concurrency gate
    pub fn too_many_concurrent() -> Self {
        Self::RateLimit {
            message: "Too many concurrent operations. Please wait and try again.".to_string(),
            reason: "too_many_concurrent_operations",
            retry_after: CONCURRENCY_RETRY_AFTER_SECS,
        }
    }

    /// Rejection from a per-client rate gate
    pub fn rate_limited<S: Into<String>>(message: S, reason: &'static str, retry_after: u64) -> Self {
        Self::RateLimit {
            message: message.into(),
            reason,
            retry_after,
        }
    }

    /// Whether this error came from an admission gate
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimit { .. })
    }

    /// Retry hint carried by rate limit errors
    pub fn retry_after(&self) -> Option<u64> {
        match self {
            Self::RateLimit { retry_after, .. } => Some(*retry_after),
            _ => None,
        }
    }
}
