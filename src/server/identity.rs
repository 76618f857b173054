//! Client identity used to scope per-client counters

use crate::server::state::AppState;
use actix_web::dev::{ConnectionInfo, Payload, ServiceRequest};
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures::future::{Ready, ready};
use std::convert::Infallible;
use std::fmt;
use std::net::SocketAddr;

const UNKNOWN: &str = "unknown";

/// Client IP address as a string, or `unknown`.
///
/// The forwarded-for address is only used when the deployment sits behind a
/// trusted proxy. Clients behind one NAT share an identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClientIdentity(String);

impl ClientIdentity {
    pub fn new(identity: impl Into<String>) -> Self {
        Self(identity.into())
    }

    pub fn from_connection(info: &ConnectionInfo, trust_forwarded_for: bool) -> Self {
        let raw = if trust_forwarded_for {
            info.realip_remote_addr()
        } else {
            info.peer_addr()
        };
        raw.map(normalize).map(Self).unwrap_or_else(|| Self(UNKNOWN.to_string()))
    }

    /// Identity for a request passing through middleware.
    ///
    /// Stored in the request extensions so handlers see the same value.
    pub fn resolve(req: &ServiceRequest, trust_forwarded_for: bool) -> Self {
        if let Some(identity) = req.extensions().get::<ClientIdentity>() {
            return identity.clone();
        }
        let identity = Self::from_connection(&req.connection_info(), trust_forwarded_for);
        req.extensions_mut().insert(identity.clone());
        identity
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Strip a port from `ip:port` or `[v6]:port`
fn normalize(addr: &str) -> String {
    addr.parse::<SocketAddr>()
        .map(|socket| socket.ip().to_string())
        .unwrap_or_else(|_| addr.trim_matches(|c| c == '[' || c == ']').to_string())
}

impl fmt::Display for ClientIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromRequest for ClientIdentity {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        if let Some(identity) = req.extensions().get::<ClientIdentity>() {
            return ready(Ok(identity.clone()));
        }
        let trust = req
            .app_data::<web::Data<AppState>>()
            .is_some_and(|state| state.config.server.trust_forwarded_for);
        ready(Ok(Self::from_connection(&req.connection_info(), trust)))
    }
}
