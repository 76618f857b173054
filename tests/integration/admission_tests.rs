//! Admission gate integration tests
//!
//! Concurrency slots and rate windows through the limiter and through the
//! guarded `/api` scope.

#[cfg(test)]
mod tests {
    use crate::common::{GuardFixture, render};
    use crate::{assert_err, assert_ok};
    use actix_web::http::StatusCode;
    use actix_web::{HttpResponse, test, web};
    use resource_guard::core::admission::OperationKind;
    use resource_guard::server::routes::Throttles;
    use resource_guard::storage::CounterStore;
    use resource_guard::{GuardError, HttpServer};
    use std::time::Duration;

    fn slow_routes(cfg: &mut web::ServiceConfig) {
        cfg.route(
            "/slow",
            web::get().to(|| async {
                tokio::time::sleep(Duration::from_millis(100)).await;
                HttpResponse::Ok().finish()
            }),
        );
    }

    // ==================== Concurrency slots ====================

    /// Test that max slots are granted, max+1 is refused and release returns to 0
    #[tokio::test]
    async fn test_slots_up_to_max_then_release() {
        let fx = GuardFixture::new();
        let state = fx.state();

        let mut permits = Vec::new();
        for expected in 1..=3 {
            let permit = assert_ok!(state.limiter.acquire("10.0.0.1").await);
            assert_eq!(permit.in_flight(), expected);
            permits.push(permit);
        }

        let err = assert_err!(state.limiter.acquire("10.0.0.1").await);
        assert!(matches!(
            err,
            GuardError::RateLimit {
                reason: "too_many_concurrent_operations",
                retry_after: 30,
                ..
            }
        ));
        assert_eq!(state.limiter.in_flight("10.0.0.1").await.unwrap(), 3);

        for permit in permits {
            assert_ok!(permit.release().await);
        }
        assert_eq!(state.limiter.in_flight("10.0.0.1").await.unwrap(), 0);
    }

    /// Test that stale-entry cleanup keeps held slots counted
    #[tokio::test]
    async fn test_cleanup_keeps_held_slots() {
        let fx = GuardFixture::new();
        let state = fx.state();

        let mut permits = Vec::new();
        for _ in 0..3 {
            permits.push(assert_ok!(state.limiter.acquire("10.0.0.7").await));
        }

        assert_ok!(state.reporter.cleanup_old_entries().await);
        assert_eq!(state.limiter.in_flight("10.0.0.7").await.unwrap(), 3);

        let err = assert_err!(state.limiter.acquire("10.0.0.7").await);
        assert!(matches!(
            err,
            GuardError::RateLimit {
                reason: "too_many_concurrent_operations",
                ..
            }
        ));

        for permit in permits {
            assert_ok!(permit.release().await);
        }
        assert_eq!(state.limiter.in_flight("10.0.0.7").await.unwrap(), 0);
    }

    /// Test that a release on an empty counter never goes negative
    #[tokio::test]
    async fn test_counter_never_negative() {
        let fx = GuardFixture::new();
        let ttl = Duration::from_secs(60);

        assert_eq!(
            fx.store
                .decrement_floor("concurrent_operations_10.0.0.2", ttl)
                .await
                .unwrap(),
            0
        );
        assert_eq!(
            fx.store
                .counter("concurrent_operations_10.0.0.2")
                .await
                .unwrap(),
            0
        );
    }

    /// Test that a dropped permit gives its slot back
    #[tokio::test]
    async fn test_dropped_permit_releases_slot() {
        let fx = GuardFixture::new();
        let state = fx.state();

        let permit = assert_ok!(state.limiter.acquire("10.0.0.3").await);
        drop(permit);

        // Release runs on a spawned task
        for _ in 0..50 {
            if state.limiter.in_flight("10.0.0.3").await.unwrap() == 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
        assert_eq!(state.limiter.in_flight("10.0.0.3").await.unwrap(), 0);
    }

    /// Test that four overlapping requests from one client admit exactly three
    #[actix_web::test]
    async fn test_overlapping_requests_admit_max() {
        let fx = GuardFixture::new();
        let app = test::init_service(HttpServer::create_app(
            web::Data::new(fx.state()),
            Throttles::new(60, 20, false),
            Some(slow_routes),
        ))
        .await;

        let request = || {
            test::TestRequest::get()
                .uri("/api/slow")
                .peer_addr("10.0.0.4:1000".parse().unwrap())
                .to_request()
        };
        let (a, b, c, d) = futures::join!(
            render(&app, request()),
            render(&app, request()),
            render(&app, request()),
            render(&app, request())
        );

        let statuses = [a.status, b.status, c.status, d.status];
        let ok = statuses.iter().filter(|s| **s == StatusCode::OK).count();
        let rejected: Vec<_> = [a, b, c, d]
            .into_iter()
            .filter(|r| r.status == StatusCode::TOO_MANY_REQUESTS)
            .collect();

        assert_eq!(ok, 3);
        assert_eq!(rejected.len(), 1);
        assert_eq!(rejected[0].retry_after(), Some(30));
        assert_eq!(
            rejected[0].body["error"]["reason"],
            "too_many_concurrent_operations"
        );

        assert_eq!(
            fx.store
                .counter("concurrent_operations_10.0.0.4")
                .await
                .unwrap(),
            0
        );
    }

    // ==================== Rate windows ====================

    /// Test that the external-API gate admits five and leaves the counter at five
    #[tokio::test]
    async fn test_external_rate_gate() {
        let fx = GuardFixture::new();
        let state = fx.state();

        for expected in 1..=5 {
            let count = assert_ok!(
                state
                    .limiter
                    .check_rate(OperationKind::ExternalApi, "10.0.0.5")
                    .await
            );
            assert_eq!(count, expected);
        }

        let err = assert_err!(
            state
                .limiter
                .check_rate(OperationKind::ExternalApi, "10.0.0.5")
                .await
        );
        assert!(err.is_rate_limit());
        assert_eq!(err.retry_after(), Some(60));
        assert_eq!(
            fx.store
                .counter("external_operations_10.0.0.5")
                .await
                .unwrap(),
            5
        );
    }

    /// Test that the import gate is independent from the concurrency slot
    #[tokio::test]
    async fn test_import_gate_independent_of_slots() {
        let fx = GuardFixture::new();
        let state = fx.state();

        let _permit = assert_ok!(state.limiter.acquire("10.0.0.6").await);
        assert_ok!(state.limiter.check_rate(OperationKind::Import, "10.0.0.6").await);
        assert_ok!(state.limiter.check_rate(OperationKind::Import, "10.0.0.6").await);
        assert_err!(state.limiter.check_rate(OperationKind::Import, "10.0.0.6").await);

        assert_eq!(state.limiter.in_flight("10.0.0.6").await.unwrap(), 1);
        assert_eq!(
            fx.store
                .counter("external_operations_10.0.0.6")
                .await
                .unwrap(),
            0
        );
    }

    /// Test that a lower configured limit is honored
    #[tokio::test]
    async fn test_configured_concurrency_limit() {
        let fx = GuardFixture::new().with_config(|c| c.rate_limiting.concurrent_operations = 1);
        let state = fx.state();

        let _held = assert_ok!(state.limiter.acquire("10.0.0.7").await);
        assert_err!(state.limiter.acquire("10.0.0.7").await);
        assert_ok!(state.limiter.acquire("10.0.0.8").await);
    }
}
