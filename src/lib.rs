//! # resource-guard
//!
//! Resource guard and admission control for services that share a small,
//! memory-constrained host.
//!
//! ## Features
//!
//! - **Resource Guard**: memory, database, counter-store, concurrency and
//!   external-API checks folded into one worst-of status report
//! - **Admission Limiter**: per-client concurrency slots and rate gates backed
//!   by atomic counter-store operations
//! - **Reporting**: hourly metric buckets aggregated over a lookback window
//! - **HTTP surface**: actix-web routes with per-client throttles
//!
//! ## Embedding
//!
//! ```rust,no_run
//! use resource_guard::{Config, server::builder::ServerBuilder};
//! use actix_web::web;
//!
//! fn business_routes(cfg: &mut web::ServiceConfig) {
//!     cfg.route("/orders", web::get().to(|| async { "orders" }));
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/guard.yaml").await?;
//!     let server = ServerBuilder::new()
//!         .with_config(config)
//!         .with_guarded_routes(business_routes)
//!         .build()
//!         .await?;
//!     server.start().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod monitoring;
pub mod server;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::{Config, GuardConfig};
pub use core::admission::{AdmissionLimiter, AdmissionPermit, OperationKind, PressureLevel};
pub use monitoring::health::{CheckResult, CleanupOutcome, ResourceGuard, Status, StatusReport};
pub use monitoring::reporter::{MetricSample, Reporter, ResourceStats};
pub use server::{AppState, ClientIdentity, HttpServer};
pub use storage::{CounterStore, MemoryCounterStore};
pub use utils::error::{GuardError, Result};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information reported by the binaries
#[derive(Debug, Clone)]
pub struct BuildInfo {
    pub version: &'static str,
    /// Optional cargo features compiled in
    pub features: Vec<&'static str>,
}

impl Default for BuildInfo {
    fn default() -> Self {
        let mut features = Vec::new();
        #[cfg(feature = "sqlite")]
        features.push("sqlite");
        #[cfg(feature = "postgres")]
        features.push("postgres");
        #[cfg(feature = "redis")]
        features.push("redis");
        #[cfg(feature = "metrics")]
        features.push("metrics");

        Self {
            version: VERSION,
            features,
        }
    }
}

pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
