//! Common test utilities for resource-guard
//!
//! # Usage
//!
//! ```rust
//! use crate::common::fixtures::GuardFixture;
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let fx = GuardFixture::new().with_memory_mb(65, 100);
//!     let report = fx.state().guard.evaluate("client").await;
//!     // ...
//! }
//! ```

pub mod fixtures;

pub use assertions::StatusReportAssertions;
pub use fixtures::GuardFixture;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header::{HeaderMap, RETRY_AFTER};
use actix_web::test;

/// Status, headers and JSON body of a rendered response
#[derive(Debug)]
pub struct Rendered {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl Rendered {
    pub fn retry_after(&self) -> Option<u64> {
        self.headers
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok())
    }
}

/// Call `app`, rendering middleware errors the way the server would
pub async fn render<S, R, B>(app: &S, req: R) -> Rendered
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, headers, bytes) = match app.call(req).await {
        Ok(res) => {
            let status = res.status();
            let headers = res.headers().clone();
            (status, headers, test::read_body(res).await)
        }
        Err(err) => {
            let res = err.error_response();
            let status = res.status();
            let headers = res.headers().clone();
            let bytes = actix_web::body::to_bytes(res.into_body())
                .await
                .expect("error body");
            (status, headers, bytes)
        }
    };

    Rendered {
        status,
        headers,
        body: serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null),
    }
}

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
