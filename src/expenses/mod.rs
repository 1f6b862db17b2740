//! Expenses
//!
//! Spending recorded against a trip: a name, a category, an amount, and
//! the day it was spent. Amounts are plain numbers in whatever currency
//! the user thinks in; there is no conversion.

/// Expense records and database operations
pub mod db;

/// HTTP handlers for the expense endpoints
pub mod handlers;

pub use db::Expense;
pub use handlers::{create_expense, delete_expense, list_expenses};
