//! Pure check classifiers
//!
//! Each function turns a raw measurement (or the error that prevented it)
//! into a `CheckResult`. Thresholds compare with `>`, so a value sitting
//! exactly on a threshold stays in the lower band.

use super::types::{CheckDetail, CheckResult, Status};
use crate::monitoring::memory::MemorySnapshot;
use crate::utils::error::GuardError;
use crate::utils::round2;
use std::time::Duration;

pub const DATABASE_WARNING_MS: f64 = 1000.0;
pub const DATABASE_ERROR_MS: f64 = 2000.0;
pub const CACHE_WARNING_MS: f64 = 100.0;

fn millis(duration: Duration) -> f64 {
    round2(duration.as_secs_f64() * 1000.0)
}

pub fn classify_memory(
    snapshot: MemorySnapshot,
    warning_percent: f64,
    error_percent: f64,
) -> CheckResult {
    let raw = snapshot.percent();
    let percent = round2(raw);
    let status = if raw > error_percent {
        Status::Error
    } else if raw > warning_percent {
        Status::Warning
    } else {
        Status::Ok
    };

    CheckResult::new(
        "memory",
        status,
        format!("Memory usage: {percent:.2}%"),
        CheckDetail::Memory {
            usage: snapshot.usage,
            peak: snapshot.peak,
            limit: snapshot.limit,
            percent,
        },
    )
}

pub fn classify_database(latency: Result<Duration, GuardError>) -> CheckResult {
    match latency {
        Ok(latency) => {
            let duration_ms = millis(latency);
            let status = if duration_ms > DATABASE_ERROR_MS {
                Status::Error
            } else if duration_ms > DATABASE_WARNING_MS {
                Status::Warning
            } else {
                Status::Ok
            };
            CheckResult::new(
                "database",
                status,
                format!("Database connection: {duration_ms}ms"),
                CheckDetail::Latency { duration_ms },
            )
        }
        Err(e) => CheckResult::failed("database", format!("Database connection failed: {e}")),
    }
}

/// `round_trip` is the elapsed time and whether the value read back matched
pub fn classify_cache(round_trip: Result<(Duration, bool), GuardError>) -> CheckResult {
    match round_trip {
        Ok((elapsed, matched)) => {
            let duration_ms = millis(elapsed);
            let status = if !matched {
                Status::Error
            } else if duration_ms > CACHE_WARNING_MS {
                Status::Warning
            } else {
                Status::Ok
            };
            let message = if matched {
                format!("Cache performance: {duration_ms}ms")
            } else {
                format!("Cache probe value mismatch after {duration_ms}ms")
            };
            CheckResult::new("cache", status, message, CheckDetail::Latency { duration_ms })
        }
        Err(e) => CheckResult::failed("cache", format!("Cache test failed: {e}")),
    }
}

/// Warn when `current` has reached `max`
pub fn classify_counter(
    name: &str,
    label: &str,
    current: Result<i64, GuardError>,
    max: i64,
) -> CheckResult {
    match current {
        Ok(current) => {
            let status = if current >= max {
                Status::Warning
            } else {
                Status::Ok
            };
            CheckResult::new(
                name,
                status,
                format!("{label}: {current}/{max}"),
                CheckDetail::Counter { current, max },
            )
        }
        Err(e) => CheckResult::failed(name, format!("{label} check failed: {e}")),
    }
}
