//! Expense Storage
//!
//! Expenses are recorded against a trip. Creation verifies trip
//! ownership inside the insert's transaction; reads and deletes are
//! single statements scoped to the owner.

use chrono::NaiveDate;
use serde::Serialize;

use crate::db::Database;
use crate::error::AppError;
use crate::trips;

/// An expense row.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i64,
    pub trip_id: i64,
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub spent_on: NaiveDate,
}

/// Fields for a new expense.
pub struct NewExpense {
    pub name: String,
    pub category: String,
    pub amount: f64,
    pub spent_on: NaiveDate,
}

const EXPENSE_COLUMNS: &str = "id, trip_id, name, category, amount, spent_on";

/// Insert an expense against a trip the caller owns.
///
/// # Errors
///
/// * `NotFound` - trip absent or owned by someone else
pub async fn create_expense(
    db: &Database,
    user_email: &str,
    trip_id: i64,
    new_expense: NewExpense,
) -> Result<Expense, AppError> {
    let mut tx = db.begin().await?;

    match trips::db::trip_owned(&mut tx, user_email, trip_id).await {
        Ok(true) => {}
        Ok(false) => {
            tx.rollback().await?;
            return Err(AppError::not_found("Trip"));
        }
        Err(e) => {
            tx.rollback().await?;
            return Err(e);
        }
    }

    let inserted = tx
        .fetch_one(
            sqlx::query_as::<_, Expense>(&format!(
                "INSERT INTO expenses (user_email, trip_id, name, category, amount, spent_on) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 RETURNING {EXPENSE_COLUMNS}"
            ))
            .bind(user_email)
            .bind(trip_id)
            .bind(&new_expense.name)
            .bind(&new_expense.category)
            .bind(new_expense.amount)
            .bind(new_expense.spent_on),
        )
        .await;

    match inserted {
        Ok(expense) => {
            tx.commit().await?;
            tracing::info!("Recorded expense on trip {} for {}", trip_id, user_email);
            Ok(expense)
        }
        Err(e) => {
            tx.rollback().await?;
            Err(e)
        }
    }
}

/// Expenses recorded against a trip, oldest spend first.
pub async fn list_expenses_for_trip(
    db: &Database,
    user_email: &str,
    trip_id: i64,
) -> Result<Vec<Expense>, AppError> {
    db.fetch_all(
        sqlx::query_as::<_, Expense>(&format!(
            "SELECT {EXPENSE_COLUMNS} FROM expenses \
             WHERE trip_id = $1 AND user_email = $2 ORDER BY spent_on, id"
        ))
        .bind(trip_id)
        .bind(user_email),
    )
    .await
}

/// Delete an expense.
///
/// # Returns
///
/// `false` when the expense does not exist or is not owned by the
/// caller.
pub async fn delete_expense(
    db: &Database,
    user_email: &str,
    expense_id: i64,
) -> Result<bool, AppError> {
    let affected = db
        .execute(
            sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_email = $2")
                .bind(expense_id)
                .bind(user_email),
        )
        .await?;

    Ok(affected > 0)
}
