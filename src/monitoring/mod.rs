//! Resource monitoring
//!
//! - `memory`: process memory source
//! - `health`: the resource guard and its report types
//! - `reporter`: hourly sample buckets and statistics
//! - `alerts`: structured alert log records

pub mod alerts;
pub mod health;
pub mod memory;
pub mod reporter;

pub use alerts::{AlertSeverity, ResourceAlert};
pub use health::{CheckResult, CleanupOutcome, ResourceGuard, Status, StatusReport};
pub use memory::{MemorySnapshot, MemorySource, ProcessMemory, StaticMemory};
pub use reporter::{DetailedStats, MetricSample, Reporter, ResourceStats};
