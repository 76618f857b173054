//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::routes::{self, GuardedRoutes, Throttles};
use crate::server::state::AppState;
use crate::utils::error::{GuardError, Result};
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::time::Duration;
use tracing::info;

const THROTTLE_CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

pub struct HttpServer {
    config: ServerConfig,
    state: AppState,
    guarded: Option<GuardedRoutes>,
}

impl HttpServer {
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        let state = AppState::new(config).await?;
        Ok(Self::with_state(state))
    }

    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.server.clone(),
            state,
            guarded: None,
        }
    }

    /// Mount application routes inside the guarded `/api` scope
    pub fn with_guarded_routes(mut self, routes: GuardedRoutes) -> Self {
        self.guarded = Some(routes);
        self
    }

    /// Build the actix application
    pub fn create_app(
        state: web::Data<AppState>,
        throttles: Throttles,
        guarded: Option<GuardedRoutes>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(state)
            .wrap(Logger::default())
            .wrap(DefaultHeaders::new().add(("Server", "resource-guard")))
            .configure(move |cfg| routes::configure_routes(cfg, &throttles, guarded))
    }

    /// Bind and serve until shutdown
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        info!("Starting HTTP server on {}", bind_addr);

        let throttles = Throttles::from_config(&self.config);
        throttles.health.start_cleanup_task(THROTTLE_CLEANUP_INTERVAL);
        throttles.optimization.start_cleanup_task(THROTTLE_CLEANUP_INTERVAL);

        let limits = self.state.limits;
        let guarded = self.guarded;
        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || {
            Self::create_app(state.clone(), throttles.clone(), guarded)
        })
        .client_request_timeout(limits.input);
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| GuardError::config(format!("Failed to bind {}: {}", bind_addr, e)))?
            .run();

        info!("HTTP server listening on {}", bind_addr);
        server
            .await
            .map_err(|e| GuardError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }
}
