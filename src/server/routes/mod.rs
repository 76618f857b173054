//! HTTP route modules
//!
//! - `/health`: guard report and emergency cleanup
//! - `/optimization`: statistics, samples and cache cleanup
//! - `/api`: guarded scope for application routes

pub mod api;
pub mod health;
pub mod optimization;

use crate::server::middleware::RateLimitMiddleware;
use actix_web::web;

/// Scope throttles shared by every worker
#[derive(Debug, Clone)]
pub struct Throttles {
    pub health: RateLimitMiddleware,
    pub optimization: RateLimitMiddleware,
}

impl Throttles {
    pub fn new(health_rpm: u32, optimization_rpm: u32, trust_forwarded_for: bool) -> Self {
        Self {
            health: RateLimitMiddleware::new(health_rpm, trust_forwarded_for),
            optimization: RateLimitMiddleware::new(optimization_rpm, trust_forwarded_for),
        }
    }

    pub fn from_config(config: &crate::config::ServerConfig) -> Self {
        Self::new(
            config.health_rpm,
            config.optimization_rpm,
            config.trust_forwarded_for,
        )
    }
}

/// Extra routes mounted inside the guarded `/api` scope
pub type GuardedRoutes = fn(&mut web::ServiceConfig);

/// Register every scope
pub fn configure_routes(cfg: &mut web::ServiceConfig, throttles: &Throttles, guarded: Option<GuardedRoutes>) {
    health::configure_routes(cfg, throttles.health.clone());
    optimization::configure_routes(cfg, throttles.optimization.clone());
    api::configure_routes(cfg, guarded);
}
