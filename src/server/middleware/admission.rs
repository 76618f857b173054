//! Admission middleware for guarded routes

use crate::server::identity::ClientIdentity;
use crate::server::state::AppState;
use crate::utils::error::GuardError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::web;
use futures::future::{Ready, ready};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::time::Instant;
use tracing::{debug, warn};

/// Wraps a scope so every request holds a concurrency slot while it runs.
///
/// Requires `web::Data<AppState>` in the app; without it requests pass
/// through untouched.
#[derive(Debug, Clone, Default)]
pub struct AdmissionMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AdmissionMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = AdmissionMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdmissionMiddlewareService {
            service: Rc::new(service),
        }))
    }
}

pub struct AdmissionMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AdmissionMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let Some(state) = req.app_data::<web::Data<AppState>>().cloned() else {
                return service.call(req).await;
            };

            let identity = ClientIdentity::resolve(&req, state.config.server.trust_forwarded_for);
            state.limiter.prepare().await;
            let permit = state.limiter.acquire(identity.as_str()).await?;

            let label = format!("{} {}", req.method(), req.path());
            let start = Instant::now();
            let outcome = tokio::time::timeout(state.limits.execution, service.call(req)).await;

            if let Err(e) = permit.release().await {
                warn!(identity = %identity, error = %e, "Failed to release concurrency slot");
            }
            if state.config.monitoring.enable_resource_monitoring {
                if let Err(e) = state.reporter.record_sample(&label).await {
                    warn!(operation = %label, error = %e, "Failed to record resource sample");
                }
            }

            match outcome {
                Ok(result) => {
                    debug!(operation = %label, elapsed = ?start.elapsed(), "Guarded operation finished");
                    result
                }
                Err(_) => {
                    warn!(operation = %label, identity = %identity, "Guarded operation timed out");
                    Err(GuardError::timeout(format!(
                        "operation exceeded {}s execution limit",
                        state.limits.execution.as_secs()
                    ))
                    .into())
                }
            }
        })
    }
}
