//! Guarded application scope

use super::GuardedRoutes;
use crate::server::identity::ClientIdentity;
use crate::server::middleware::AdmissionMiddleware;
use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::web;
use serde::Serialize;

pub fn configure_routes(cfg: &mut web::ServiceConfig, guarded: Option<GuardedRoutes>) {
    let mut scope = web::scope("/api")
        .wrap(AdmissionMiddleware)
        .route("/status", web::get().to(admission_status));
    if let Some(routes) = guarded {
        scope = scope.configure(routes);
    }
    cfg.service(scope);
}

#[derive(Debug, Serialize)]
pub struct AdmissionStatus {
    pub identity: String,
    /// Includes the slot held by this request
    pub in_flight: i64,
    pub max: i64,
}

async fn admission_status(
    state: web::Data<AppState>,
    identity: ClientIdentity,
) -> Result<web::Json<AdmissionStatus>> {
    let in_flight = state.limiter.in_flight(identity.as_str()).await?;
    Ok(web::Json(AdmissionStatus {
        identity: identity.to_string(),
        in_flight,
        max: state.config.rate_limiting.concurrent_operations,
    }))
}
