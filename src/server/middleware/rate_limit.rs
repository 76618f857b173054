//! Per-client request throttle for route scopes

use crate::server::identity::ClientIdentity;
use crate::utils::error::GuardError;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use futures::future::{Ready, ready};
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::future::Future;
use std::num::NonZeroU32;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Requests-per-minute limit keyed by client identity.
///
/// Build it once outside the app factory and clone it into each worker so
/// all workers share one set of buckets.
#[derive(Clone)]
pub struct RateLimitMiddleware {
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
    requests_per_minute: u32,
    trust_forwarded_for: bool,
}

impl std::fmt::Debug for RateLimitMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RateLimitMiddleware")
            .field("requests_per_minute", &self.requests_per_minute)
            .field("trust_forwarded_for", &self.trust_forwarded_for)
            .finish()
    }
}

impl RateLimitMiddleware {
    pub fn new(requests_per_minute: u32, trust_forwarded_for: bool) -> Self {
        let rpm = NonZeroU32::new(requests_per_minute).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: Arc::new(RateLimiter::keyed(Quota::per_minute(rpm))),
            requests_per_minute: rpm.get(),
            trust_forwarded_for,
        }
    }

    pub fn requests_per_minute(&self) -> u32 {
        self.requests_per_minute
    }

    /// Periodically drop buckets that have fully refilled
    pub fn start_cleanup_task(&self, interval: Duration) {
        let limiter = Arc::downgrade(&self.limiter);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let Some(limiter) = limiter.upgrade() else {
                    break;
                };
                limiter.retain_recent();
                limiter.shrink_to_fit();
                debug!(tracked = limiter.len(), "Pruned request throttle buckets");
            }
        });
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimitMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RateLimitMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddlewareService {
            service,
            limiter: self.limiter.clone(),
            trust_forwarded_for: self.trust_forwarded_for,
        }))
    }
}

pub struct RateLimitMiddlewareService<S> {
    service: S,
    limiter: Arc<DefaultKeyedRateLimiter<String>>,
    trust_forwarded_for: bool,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let identity = ClientIdentity::resolve(&req, self.trust_forwarded_for);

        if let Err(not_until) = self.limiter.check_key(&identity.as_str().to_string()) {
            let wait = not_until.wait_time_from(DefaultClock::default().now());
            let retry_after = wait.as_secs().max(1);
            warn!(
                identity = %identity,
                path = %req.path(),
                retry_after,
                "Request throttled"
            );
            let error = GuardError::rate_limited(
                "Too many requests. Please slow down.",
                "too_many_requests",
                retry_after,
            );
            return Box::pin(ready(Err(error.into())));
        }

        let fut = self.service.call(req);
        Box::pin(fut)
    }
}
