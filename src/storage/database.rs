//! Database reachability probe
//!
//! The guard never reads or writes application tables. It only needs to know
//! how long it takes to get a usable connection, and it runs a handful of
//! maintenance statements on request.

use crate::config::DatabaseConfig;
use crate::utils::error::{GuardError, Result};
use async_trait::async_trait;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseBackend, DatabaseConnection};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

#[async_trait]
pub trait DatabaseProbe: Send + Sync + std::fmt::Debug {
    /// Acquire a working connection and return how long it took
    async fn acquire(&self) -> Result<Duration>;

    /// Run maintenance statements; returns how many ran
    async fn run_maintenance(&self) -> Result<usize>;
}

/// SeaORM-backed probe.
///
/// Connects lazily so a database that is down at startup shows up as a failed
/// check instead of preventing the guard from starting. A failed ping drops
/// the cached connection and the next probe reconnects.
#[derive(Debug)]
pub struct SeaOrmProbe {
    url: String,
    pool_size: u32,
    connect_timeout: Duration,
    query_timeout: Duration,
    statements: Vec<String>,
    conn: RwLock<Option<DatabaseConnection>>,
}

impl SeaOrmProbe {
    pub fn new(config: &DatabaseConfig, connect_timeout: Duration) -> Self {
        Self {
            url: config.url.clone(),
            pool_size: config.connection_pool_size,
            connect_timeout,
            query_timeout: Duration::from_secs(config.query_timeout),
            statements: config.maintenance_statements.clone(),
            conn: RwLock::new(None),
        }
    }

    async fn connect(&self) -> Result<DatabaseConnection> {
        debug!("Opening database connection pool");
        let mut opt = ConnectOptions::new(self.url.clone());
        opt.max_connections(self.pool_size.max(1))
            .min_connections(1)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.connect_timeout)
            .sqlx_logging(false);

        let conn = tokio::time::timeout(self.connect_timeout, Database::connect(opt))
            .await
            .map_err(|_| {
                GuardError::connectivity(format!(
                    "database connect timed out after {}s",
                    self.connect_timeout.as_secs()
                ))
            })??;
        info!("Database connection established");
        Ok(conn)
    }

    async fn connection(&self) -> Result<DatabaseConnection> {
        if let Some(conn) = self.conn.read().await.as_ref() {
            return Ok(conn.clone());
        }

        let mut slot = self.conn.write().await;
        if let Some(conn) = slot.as_ref() {
            return Ok(conn.clone());
        }
        let conn = self.connect().await?;
        *slot = Some(conn.clone());
        Ok(conn)
    }

    async fn invalidate(&self) {
        self.conn.write().await.take();
    }

    fn default_statements(backend: DatabaseBackend) -> Vec<String> {
        match backend {
            DatabaseBackend::Sqlite => vec!["PRAGMA optimize".to_string()],
            DatabaseBackend::Postgres => vec!["ANALYZE".to_string()],
            _ => Vec::new(),
        }
    }
}

#[async_trait]
impl DatabaseProbe for SeaOrmProbe {
    async fn acquire(&self) -> Result<Duration> {
        let start = Instant::now();
        let conn = self.connection().await?;

        let ping = tokio::time::timeout(self.query_timeout, conn.ping()).await;
        match ping {
            Ok(Ok(())) => Ok(start.elapsed()),
            Ok(Err(e)) => {
                self.invalidate().await;
                Err(GuardError::Database(e))
            }
            Err(_) => {
                self.invalidate().await;
                Err(GuardError::timeout("database ping timed out"))
            }
        }
    }

    async fn run_maintenance(&self) -> Result<usize> {
        let conn = self.connection().await?;
        let statements = if self.statements.is_empty() {
            Self::default_statements(conn.get_database_backend())
        } else {
            self.statements.clone()
        };

        let mut ran = 0;
        for statement in &statements {
            match conn.execute_unprepared(statement).await {
                Ok(_) => {
                    debug!(statement = %statement, "Ran maintenance statement");
                    ran += 1;
                }
                Err(e) => warn!(statement = %statement, error = %e, "Maintenance statement failed"),
            }
        }
        info!(ran, total = statements.len(), "Database maintenance finished");
        Ok(ran)
    }
}

/// Probe with a fixed answer
#[derive(Debug, Clone)]
pub struct StaticProbe {
    latency: Duration,
    failure: Option<String>,
}

impl StaticProbe {
    pub fn healthy(latency: Duration) -> Self {
        Self {
            latency,
            failure: None,
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            latency: Duration::ZERO,
            failure: Some(message.into()),
        }
    }
}

#[async_trait]
impl DatabaseProbe for StaticProbe {
    async fn acquire(&self) -> Result<Duration> {
        match &self.failure {
            Some(message) => Err(GuardError::connectivity(message.clone())),
            None => Ok(self.latency),
        }
    }

    async fn run_maintenance(&self) -> Result<usize> {
        self.acquire().await.map(|_| 0)
    }
}
