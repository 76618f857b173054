//! HTTP middleware
//!
//! - `admission`: per-client concurrency slot, memory housekeeping and
//!   execution timeout around guarded routes
//! - `rate_limit`: per-client requests-per-minute throttle for route scopes

mod admission;
mod rate_limit;


pub use admission::{AdmissionMiddleware, AdmissionMiddlewareService};
pub use rate_limit::{RateLimitMiddleware, RateLimitMiddlewareService};
