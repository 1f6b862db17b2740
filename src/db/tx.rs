//! Transaction Handles
//!
//! A `TxHandle` is one pooled connection with an open transaction. Every
//! statement that should join the transaction goes through the handle;
//! nothing else can reach that connection. `commit` and `rollback` take
//! the handle by value, so once a transaction has been finalized the
//! compiler rejects any further use. Dropping a live handle rolls the
//! transaction back and returns the connection to the pool, which covers
//! early returns, panics, and cancelled request tasks.

use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{Execute, FromRow, Postgres, Transaction};

use crate::error::AppError;

/// An open database transaction bound to one pooled connection.
pub struct TxHandle {
    tx: Transaction<'static, Postgres>,
}

impl TxHandle {
    pub(crate) fn new(tx: Transaction<'static, Postgres>) -> Self {
        Self { tx }
    }

    /// Run one statement inside the transaction.
    ///
    /// # Returns
    ///
    /// The number of rows the statement affected.
    pub async fn execute(
        &mut self,
        query: Query<'_, Postgres, PgArguments>,
    ) -> Result<u64, AppError> {
        tracing::debug!("Executing in transaction: {}", query.sql());
        let result = query
            .execute(&mut *self.tx)
            .await
            .map_err(AppError::database)?;
        Ok(result.rows_affected())
    }

    /// Run one statement inside the transaction and decode exactly one row.
    pub async fn fetch_one<O>(
        &mut self,
        query: QueryAs<'_, Postgres, O, PgArguments>,
    ) -> Result<O, AppError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        query
            .fetch_one(&mut *self.tx)
            .await
            .map_err(AppError::database)
    }

    /// Run one statement inside the transaction and decode at most one row.
    pub async fn fetch_optional<O>(
        &mut self,
        query: QueryAs<'_, Postgres, O, PgArguments>,
    ) -> Result<Option<O>, AppError>
    where
        O: Send + Unpin + for<'r> FromRow<'r, PgRow>,
    {
        query
            .fetch_optional(&mut *self.tx)
            .await
            .map_err(AppError::database)
    }

    /// Run the same statement once per parameter set, in order.
    ///
    /// The sets execute sequentially on this transaction's connection and
    /// the first failure aborts the rest, leaving the transaction ready to
    /// be rolled back. An empty `param_sets` is a caller bug and fails
    /// without touching the connection.
    ///
    /// # Returns
    ///
    /// The total number of rows affected across all sets.
    pub async fn execute_batch<'q, T>(
        &mut self,
        statement: &'q str,
        param_sets: Vec<Vec<T>>,
    ) -> Result<u64, AppError>
    where
        T: 'q + sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Send,
    {
        if param_sets.is_empty() {
            return Err(AppError::internal(
                "batch execution requires at least one parameter set",
            ));
        }

        tracing::debug!(
            "Executing batch of {} in transaction: {}",
            param_sets.len(),
            statement
        );

        let mut affected = 0;
        for params in param_sets {
            let mut query = sqlx::query(statement);
            for value in params {
                query = query.bind(value);
            }
            let result = query
                .execute(&mut *self.tx)
                .await
                .map_err(AppError::database)?;
            affected += result.rows_affected();
        }
        Ok(affected)
    }

    /// Make the transaction's writes permanent and release the connection.
    pub async fn commit(self) -> Result<(), AppError> {
        tracing::info!("Committing transaction");
        self.tx.commit().await.map_err(AppError::database)
    }

    /// Undo everything since `begin` and release the connection.
    pub async fn rollback(self) -> Result<(), AppError> {
        tracing::info!("Rolling back transaction");
        self.tx.rollback().await.map_err(AppError::database)
    }
}
