//! Resource guard endpoints

use crate::server::identity::ClientIdentity;
use crate::server::middleware::RateLimitMiddleware;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use tracing::{debug, info};

pub fn configure_routes(cfg: &mut web::ServiceConfig, throttle: RateLimitMiddleware) {
    cfg.service(
        web::scope("/health")
            .wrap(throttle)
            .route("", web::get().to(resource_status))
            .route("/cleanup", web::post().to(emergency_cleanup)),
    );
}

/// Evaluate every check for the calling client.
///
/// Always 200; the report carries its own status.
pub async fn resource_status(
    state: web::Data<AppState>,
    identity: ClientIdentity,
) -> ActixResult<HttpResponse> {
    debug!(identity = %identity, "Resource status requested");
    let report = state.guard.evaluate(identity.as_str()).await;
    Ok(HttpResponse::Ok().json(report))
}

/// Reclaim memory and clear the counter store; 500 when the store fails
pub async fn emergency_cleanup(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    info!("Emergency cleanup requested");
    let outcome = state.guard.emergency_cleanup().await;
    let response = if outcome.is_success() {
        HttpResponse::Ok().json(outcome)
    } else {
        HttpResponse::InternalServerError().json(outcome)
    };
    Ok(response)
}
