//! Report persistence.
//!
//! [`Recorder`] owns the connection pool. It provisions the `stats` table once
//! at startup and then writes one row per accepted report. It holds no other
//! state, so clones can be shared freely across concurrent requests.

use sqlx::any::{AnyPoolOptions, AnyQueryResult};
use sqlx::{Any, AnyPool};
use thiserror::Error;

use crate::config::Config;
use crate::storage::dialect::Backend;
use crate::storage::models::{SqlValue, StatsRecord};
use crate::storage::queries::{build_create_table, build_stats_insert};

/// Startup failure. The server must not accept requests after one of these.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("could not open database")]
    Connect(#[source] sqlx::Error),
    #[error("could not create stats table")]
    CreateTable(#[source] sqlx::Error),
}

/// A report could not be written.
#[derive(Debug, Error)]
#[error("could not save report")]
pub struct PersistError(#[from] sqlx::Error);

/// Writes reports to the configured backend.
#[derive(Debug, Clone)]
pub struct Recorder {
    pool: AnyPool,
    backend: Backend,
}

impl Recorder {
    /// Open a pool for the configured backend.
    pub async fn connect(config: &Config) -> Result<Self, ProvisionError> {
        sqlx::any::install_default_drivers();

        let url = config.db_driver.connect_url(&config.db);
        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&url)
            .await
            .map_err(ProvisionError::Connect)?;

        log::info!(
            "DATABASE_CONNECTED driver={} max_connections={}",
            config.db_driver,
            config.max_connections
        );

        Ok(Self::from_pool(pool, config.db_driver))
    }

    /// Wrap an existing pool. The caller vouches that `backend` matches it.
    pub fn from_pool(pool: AnyPool, backend: Backend) -> Self {
        Self { pool, backend }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Create the `stats` table if it does not exist yet.
    ///
    /// An existing table is left untouched, so this is safe to run on every
    /// startup.
    pub async fn provision_schema(&self) -> Result<(), ProvisionError> {
        let ddl = build_create_table(self.backend);
        sqlx::query(&ddl)
            .execute(&self.pool)
            .await
            .map_err(ProvisionError::CreateTable)?;

        log::info!("SCHEMA_PROVISIONED driver={} table=stats", self.backend);
        Ok(())
    }

    /// Insert one row for `record`.
    ///
    /// Runs a single statement, so a failure leaves no partial row. Nothing is
    /// retried here.
    pub async fn save(&self, record: &StatsRecord) -> Result<(), PersistError> {
        let stmt = build_stats_insert(self.backend, record);

        let mut query = sqlx::query::<Any>(&stmt.sql);
        for value in stmt.values {
            query = match value {
                SqlValue::Int(v) => query.bind(v),
                SqlValue::Text(v) => query.bind(v),
            };
        }

        let result: AnyQueryResult = query.execute(&self.pool).await?;
        log::debug!(
            "STATS_INSERT columns={} rows_affected={}",
            stmt.columns.len(),
            result.rows_affected()
        );
        Ok(())
    }
}
