//! Statistics and cleanup endpoints

use crate::monitoring::reporter::{DetailedStats, MetricSample, ResourceStats};
use crate::server::middleware::RateLimitMiddleware;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::web;
use serde::Serialize;

pub fn configure_routes(cfg: &mut web::ServiceConfig, throttle: RateLimitMiddleware) {
    cfg.service(
        web::scope("/optimization")
            .wrap(throttle)
            .route("/stats", web::get().to(stats))
            .route("/monitor", web::get().to(monitor))
            .route("/detailed", web::get().to(detailed))
            .route("/cleanup", web::post().to(cleanup)),
    );
}

#[derive(Debug, Serialize)]
pub struct CleanupResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub removed: usize,
}

async fn stats(state: web::Data<AppState>) -> Result<web::Json<ResourceStats>> {
    let hours = state.reporter.retention_hours();
    Ok(web::Json(state.reporter.statistics(hours).await?))
}

async fn monitor(state: web::Data<AppState>) -> Result<web::Json<MetricSample>> {
    Ok(web::Json(state.reporter.record_sample("api_monitor").await?))
}

async fn detailed(state: web::Data<AppState>) -> Result<web::Json<DetailedStats>> {
    Ok(web::Json(state.reporter.detailed("detailed_stats").await?))
}

async fn cleanup(state: web::Data<AppState>) -> Result<web::Json<CleanupResponse>> {
    let removed = state.reporter.cleanup_old_entries().await?;
    Ok(web::Json(CleanupResponse {
        status: "success",
        message: "Cache cleanup completed",
        removed,
    }))
}
