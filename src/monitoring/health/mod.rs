//! Resource guard
//!
//! Runs a fixed battery of checks (memory, database, counter store, per-client
//! concurrency and external API counters) and reports the worst status seen.
//! Checks never fail: any error becomes an `error` check result.

mod checks;
mod guard;
mod types;

pub use checks::{
    classify_cache, classify_counter, classify_database, classify_memory, CACHE_WARNING_MS,
    DATABASE_ERROR_MS, DATABASE_WARNING_MS,
};
pub use guard::{ResourceGuard, check_names};
pub use types::{CheckDetail, CheckResult, CleanupOutcome, CleanupStatus, Status, StatusReport};
