//! Admission limiter
//!
//! Gates each guarded unit of work per client identity:
//!
//! 1. memory pressure housekeeping (advisory, never rejects)
//! 2. a concurrency slot, held by an [`AdmissionPermit`] until release
//!
//! The effective memory ceiling is applied once, when the application state
//! is built, so every reader of the memory source sees the same limit.
//!
//! Rate gates for external API and import work are separate counters checked
//! by handlers through [`AdmissionLimiter::check_rate`].

mod keys;
mod limiter;
mod permit;
mod pressure;
mod tuning;

pub use keys::{CONCURRENCY_PREFIX, OperationKind, concurrency_key};
pub use limiter::AdmissionLimiter;
pub use permit::AdmissionPermit;
pub use pressure::{PressureLevel, classify_pressure};
pub use tuning::{ExecutionLimits, apply_memory_ceiling, effective_ceiling};
