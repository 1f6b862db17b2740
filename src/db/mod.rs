//! Database Access
//!
//! One `PgPool` wrapped so that every sqlx error is classified exactly
//! once, at this boundary: failures to reach or keep a connection become
//! `Connection` errors, failures while running a statement become `Query`
//! errors. Callers never see a raw `sqlx::Error`.
//!
//! Multi-statement writes go through [`TxHandle`], acquired from
//! [`Database::begin`]. Single-statement reads and deletes run directly
//! against the pool through the `fetch_*` and `execute` helpers.

use std::time::Duration;

use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{FromRow, Postgres};

use crate::error::AppError;
use crate::server::config::AppConfig;

pub mod tx;

pub use tx::TxHandle;

/// Bounded wait for a pooled connection. Under pool exhaustion `begin`
/// fails with a connection error instead of hanging the request.
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
const IDLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared handle to the connection pool. Cheap to clone.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Connect to PostgreSQL, dialing the server to verify the URL.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        tracing::info!(
            "Connecting to PostgreSQL (max {} connections)",
            config.database_max_connections
        );

        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .idle_timeout(IDLE_TIMEOUT)
            .connect(&config.database_url)
            .await
            .map_err(AppError::database)?;

        Ok(Self { pool })
    }

    /// Build a pool without dialing the server; connections are opened on
    /// first use. `acquire_timeout` bounds how long that first use waits.
    pub fn connect_lazy(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)
            .map_err(AppError::database)?;

        Ok(Self { pool })
    }

    /// Apply embedded migrations.
    pub async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!().run(&self.pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to finish.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// True when the database answers a trivial query.
    pub async fn is_reachable(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }

    /// Start a transaction on a dedicated pooled connection.
    ///
    /// The returned handle must be finished with `commit` or `rollback`;
    /// dropping it rolls back.
    pub async fn begin(&self) -> Result<TxHandle, AppError> {
        let tx = self.pool.begin().await.map_err(AppError::database)?;
        Ok(TxHandle::new(tx))
    }

    /// Run one standalone statement against the pool.
    ///
    /// # Returns
    ///
    /// The number of rows the statement affected.
    pub async fn execute(
        &self,
        query: Query<'_, Postgres, PgArguments>,
    ) -> Result<u64, AppError> {
        let result = query
            .execute(&self.pool)
            .await
            .map_err(AppError::database)?;
        Ok(result.rows_affected())
    }

    /// Run one standalone statement and decode exactly one row.
    pub async fn fetch_one<O>(
        &self,
        query: QueryAs<'_, Postgres, O, PgArguments>,
    ) -> Result<O, AppError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        query.fetch_one(&self.pool).await.map_err(AppError::database)
    }

    /// Run one standalone statement and decode at most one row.
    pub async fn fetch_optional<O>(
        &self,
        query: QueryAs<'_, Postgres, O, PgArguments>,
    ) -> Result<Option<O>, AppError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        query
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::database)
    }

    /// Run one standalone statement and decode all rows.
    pub async fn fetch_all<O>(
        &self,
        query: QueryAs<'_, Postgres, O, PgArguments>,
    ) -> Result<Vec<O>, AppError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        query.fetch_all(&self.pool).await.map_err(AppError::database)
    }
}
