//! Database initialization

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::{error, info};

use super::Initializer;
use crate::{config::DatabaseConfig, Error, Result};

/// Opens the PostgreSQL pool and keeps it for the rest of the process.
#[derive(Debug)]
pub struct DatabaseInitializer {
    config: DatabaseConfig,
    pool: OnceLock<PgPool>,
}

impl DatabaseInitializer {
    #[must_use]
    pub fn new(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: OnceLock::new(),
        }
    }

    /// The connected pool, once `initialize` has succeeded.
    #[must_use]
    pub fn pool(&self) -> Option<&PgPool> {
        self.pool.get()
    }
}

#[async_trait]
impl Initializer for DatabaseInitializer {
    fn name(&self) -> &'static str {
        "database"
    }

    async fn initialize(&self) -> Result<()> {
        if self.pool.get().is_some() {
            return Err(Error::AlreadyInitialized("database"));
        }

        info!(
            max_connections = self.config.max_connections,
            min_connections = self.config.min_connections,
            "Connecting to database"
        );

        let pool = PgPoolOptions::new()
            .max_connections(self.config.max_connections)
            .min_connections(self.config.min_connections)
            .acquire_timeout(Duration::from_secs(self.config.connect_timeout_seconds))
            .idle_timeout(Duration::from_secs(self.config.idle_timeout_seconds))
            .connect(&self.config.url)
            .await
            .map_err(|e| {
                error!("Failed to connect to database: {}", e);
                Error::Database(e)
            })?;

        sqlx::query("SELECT 1").execute(&pool).await?;

        self.pool
            .set(pool)
            .map_err(|_| Error::AlreadyInitialized("database"))?;

        info!("Database connected successfully");
        Ok(())
    }
}
