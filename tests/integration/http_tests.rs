//! HTTP surface integration tests

#[cfg(test)]
mod tests {
    use crate::common::{GuardFixture, render};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use resource_guard::HttpServer;
    use resource_guard::server::routes::Throttles;

    /// Test that the optimization scope is throttled per client
    #[actix_web::test]
    async fn test_optimization_throttle() {
        let fx = GuardFixture::new();
        let app = test::init_service(HttpServer::create_app(
            web::Data::new(fx.state()),
            Throttles::new(60, 20, false),
            None,
        ))
        .await;

        let request = |peer: &str| {
            test::TestRequest::get()
                .uri("/optimization/stats")
                .peer_addr(peer.parse().unwrap())
                .to_request()
        };

        for _ in 0..20 {
            let res = render(&app, request("10.2.0.1:1000")).await;
            assert_eq!(res.status, StatusCode::OK);
        }

        let res = render(&app, request("10.2.0.1:1000")).await;
        assert_eq!(res.status, StatusCode::TOO_MANY_REQUESTS);
        assert!(res.retry_after().unwrap() >= 1);
        assert_eq!(res.body["error"]["reason"], "too_many_requests");

        // Health has its own quota
        let req = test::TestRequest::get()
            .uri("/health")
            .peer_addr("10.2.0.1:1000".parse().unwrap())
            .to_request();
        assert_eq!(render(&app, req).await.status, StatusCode::OK);

        let res = render(&app, request("10.2.0.2:1000")).await;
        assert_eq!(res.status, StatusCode::OK);
    }

    /// Test that forwarded-for only counts when trusted
    #[actix_web::test]
    async fn test_forwarded_identity() {
        for (trust, expected) in [(true, "203.0.113.9"), (false, "10.2.0.3")] {
            let fx = GuardFixture::new().with_config(|c| c.server.trust_forwarded_for = trust);
            let app = test::init_service(HttpServer::create_app(
                web::Data::new(fx.state()),
                Throttles::new(60, 20, trust),
                None,
            ))
            .await;

            let req = test::TestRequest::get()
                .uri("/api/status")
                .peer_addr("10.2.0.3:1000".parse().unwrap())
                .insert_header(("x-forwarded-for", "203.0.113.9"))
                .to_request();
            let res = render(&app, req).await;
            assert_eq!(res.status, StatusCode::OK);
            assert_eq!(res.body["identity"], expected);
        }
    }

    /// Test that an error report is still served with a 200
    #[actix_web::test]
    async fn test_health_is_always_200() {
        let fx = GuardFixture::new().with_memory_mb(95, 100);
        let app = test::init_service(HttpServer::create_app(
            web::Data::new(fx.state()),
            Throttles::new(60, 20, false),
            None,
        ))
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let res = render(&app, req).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["status"], "error");
        assert_eq!(res.body["checks"]["memory"]["percent"], 95.0);
    }

    /// Test that unknown routes are not swallowed by the guarded scope
    #[actix_web::test]
    async fn test_unknown_route() {
        let fx = GuardFixture::new();
        let app = test::init_service(HttpServer::create_app(
            web::Data::new(fx.state()),
            Throttles::new(60, 20, false),
            None,
        ))
        .await;

        let req = test::TestRequest::get().uri("/missing").to_request();
        let res = render(&app, req).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
    }
}
