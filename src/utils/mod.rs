//! Utility modules for the resource guard
//!
//! - **config**: environment variable helpers used by configuration loading
//! - **error**: error types and HTTP error responses
//! - **logging**: tracing subscriber setup

pub mod config;
pub mod error;
pub mod logging;

use std::time::{SystemTime, UNIX_EPOCH};

/// Get current timestamp in seconds
pub fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Format bytes as a human readable string with two decimals
pub fn format_bytes(bytes: f64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    let mut size = bytes;
    let mut unit_index = 0;

    while size > THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    format!("{} {}", round2(size), UNITS[unit_index])
}

/// Round to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
