//! Expense Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppError;
use crate::expenses::db::{self, Expense, NewExpense};
use crate::middleware::CurrentUser;
use crate::server::state::AppState;
use crate::trips;

/// Body for POST /api/trips/{trip_id}/expenses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    pub name: Option<String>,
    pub category: Option<String>,
    pub amount: Option<f64>,
    pub spent_on: Option<NaiveDate>,
}

/// Handle POST /api/trips/{trip_id}/expenses
///
/// # Errors
///
/// * `400` - missing fields or a non-positive amount
/// * `404` - trip absent or owned by someone else
/// * `500` - database failure
pub async fn create_expense(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(trip_id): Path<i64>,
    Json(request): Json<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<Expense>), AppError> {
    let name = request.name.as_deref().map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::validation("name is required"));
    }

    let category = request
        .category
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if category.is_empty() {
        return Err(AppError::validation("category is required"));
    }

    let amount = request
        .amount
        .ok_or_else(|| AppError::validation("amount is required"))?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(AppError::validation("amount must be a positive number"));
    }

    let spent_on = request
        .spent_on
        .ok_or_else(|| AppError::validation("spentOn is required"))?;

    let expense = db::create_expense(
        &state.db,
        &user.email,
        trip_id,
        NewExpense {
            name: name.to_string(),
            category: category.to_string(),
            amount,
            spent_on,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

/// Handle GET /api/trips/{trip_id}/expenses
pub async fn list_expenses(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(trip_id): Path<i64>,
) -> Result<Json<Vec<Expense>>, AppError> {
    if trips::db::find_trip(&state.db, &user.email, trip_id).await?.is_none() {
        return Err(AppError::not_found("Trip"));
    }

    let expenses = db::list_expenses_for_trip(&state.db, &user.email, trip_id).await?;
    Ok(Json(expenses))
}

/// Handle DELETE /api/expenses/{expense_id}
pub async fn delete_expense(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(expense_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !db::delete_expense(&state.db, &user.email, expense_id).await? {
        return Err(AppError::not_found("Expense"));
    }

    Ok(StatusCode::NO_CONTENT)
}
