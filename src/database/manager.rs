use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tokio::sync::OnceCell;
use tracing::info;

use crate::config::DatabaseConfig;

/// Errors from the database layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl From<crate::filter::FilterError> for DatabaseError {
    fn from(err: crate::filter::FilterError) -> Self {
        DatabaseError::QueryError(err.to_string())
    }
}

/// Owns the process-wide connection pool for the opportunity store
pub struct DatabaseManager;

static POOL: OnceCell<PgPool> = OnceCell::const_new();

impl DatabaseManager {
    /// Get the shared pool, connecting lazily on first use
    pub async fn pool(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        POOL.get_or_try_init(|| async {
            let connection_string = Self::build_connection_string()?;
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .acquire_timeout(Duration::from_secs(config.connection_timeout))
                .connect(&connection_string)
                .await
                .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;
            info!("Created database pool (max_connections={})", config.max_connections);
            Ok::<_, DatabaseError>(pool)
        })
        .await
        .cloned()
    }

    /// Read DATABASE_URL and make sure it points at PostgreSQL
    fn build_connection_string() -> Result<String, DatabaseError> {
        let base = std::env::var("DATABASE_URL")
            .map_err(|_| DatabaseError::ConfigMissing("DATABASE_URL"))?;
        Self::validate_connection_string(&base)
    }

    fn validate_connection_string(raw: &str) -> Result<String, DatabaseError> {
        let url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        match url.scheme() {
            "postgres" | "postgresql" => {}
            _ => return Err(DatabaseError::InvalidDatabaseUrl),
        }
        if url.path().trim_start_matches('/').is_empty() {
            return Err(DatabaseError::InvalidDatabaseUrl);
        }
        Ok(url.into())
    }

    /// Close the shared pool (e.g., on shutdown)
    pub async fn close() {
        if let Some(pool) = POOL.get() {
            pool.close().await;
            info!("Closed database pool");
        }
    }
}
