//! Server builder and `run_server`

use crate::config::{Config, DEFAULT_CONFIG_PATH};
use crate::server::routes::GuardedRoutes;
use crate::server::server::HttpServer;
use crate::utils::error::{GuardError, Result};
use tracing::info;

#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    guarded: Option<GuardedRoutes>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_guarded_routes(mut self, routes: GuardedRoutes) -> Self {
        self.guarded = Some(routes);
        self
    }

    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| GuardError::config("Configuration is required"))?;

        let server = HttpServer::new(&config).await?;
        Ok(match self.guarded {
            Some(routes) => server.with_guarded_routes(routes),
            None => server,
        })
    }
}

/// Build the server for `config` and serve until shutdown
pub async fn run_server(config: Config) -> Result<()> {
    let server = ServerBuilder::new().with_config(config.clone()).build().await?;

    info!("Server starting at: http://{}", config.server().address());
    info!("Endpoints:");
    info!("   GET  /health                 resource status");
    info!("   POST /health/cleanup         emergency cleanup");
    info!("   GET  /optimization/stats     resource statistics");
    info!("   GET  /optimization/monitor   record a sample");
    info!("   GET  /optimization/detailed  statistics plus a fresh sample");
    info!("   POST /optimization/cleanup   evict stale counters and samples");
    info!("   GET  /api/status             guarded admission status");

    server.start().await
}

/// Load configuration from `path`, falling back to the environment
pub async fn load_config(path: Option<&str>) -> Result<Config> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    info!("Loading configuration file: {}", path);
    Config::load(path).await
}
