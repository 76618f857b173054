//! HTTP server
//!
//! Routes, middleware and shared state for the guard's HTTP surface.

pub mod builder;
pub mod identity;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;


pub use identity::ClientIdentity;
pub use server::HttpServer;
pub use state::AppState;
