use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Query error: {0}")]
    QueryError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Owns the process-wide PostgreSQL connection pool
#[derive(Clone)]
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// DDL for the append-only feedback table
    pub const FEEDBACK_SCHEMA: &'static str = r#"
        CREATE TABLE IF NOT EXISTS feedback (
            session_id TEXT NULL,
            page_context JSON NOT NULL,
            action TEXT NOT NULL CHECK (action IN ('thumbs_up', 'thumbs_down'))
        )
    "#;

    /// Build a pool without opening any connection yet. Connections are
    /// established on first use, so the server can start while the database
    /// is still unreachable.
    pub fn connect_lazy(config: &DatabaseConfig) -> Self {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout())
            .connect_lazy_with(Self::connect_options(config));

        info!(
            "Created lazy database pool for {}@{}:{}/{}",
            config.user, config.host, config.port, config.name
        );
        Self { pool }
    }

    /// Wrap an already-built pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    fn connect_options(config: &DatabaseConfig) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.name)
            .username(&config.user)
            .password(&config.password)
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the feedback table when it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        sqlx::query(Self::FEEDBACK_SCHEMA).execute(&self.pool).await?;
        info!("Feedback table is present");
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
