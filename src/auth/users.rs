//! User Records
//!
//! Data access for the `users` table. The email is the primary key and is
//! normalized (trimmed, lowercased) at this boundary before every write
//! and lookup, so identity is case-insensitive by construction.
//!
//! `User` implements neither `Serialize` nor `Debug`: the row carries the
//! password digest, and keeping the type out of serializers and `{:?}`
//! formatting means no handler or log line can leak it by accident. The
//! wire shape is [`UserProfile`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::db::{Database, TxHandle};
use crate::error::AppError;

/// A row from the `users` table.
#[derive(Clone, sqlx::FromRow)]
pub struct User {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The profile shape returned by the API. CamelCase on the wire; optional
/// fields are omitted when unset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            date_of_birth: user.date_of_birth,
            gender: user.gender.clone(),
            phone: user.phone.clone(),
        }
    }
}

/// Fields for a new account. The digest must already be hashed; this
/// module never sees a plaintext password.
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
}

const USER_COLUMNS: &str = "email, password_hash, first_name, last_name, \
     date_of_birth, gender, phone, created_at, updated_at";

/// Normalize an email for storage and lookup: trim whitespace, lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Insert a new user inside its own transaction.
///
/// The unique constraint on the email column is the source of truth for
/// duplicates, so two concurrent signups for the same address cannot both
/// succeed; the loser surfaces as `Conflict`.
pub async fn create_user(db: &Database, new_user: NewUser) -> Result<User, AppError> {
    let email = normalize_email(&new_user.email);

    let mut tx = db.begin().await?;

    let inserted = tx
        .fetch_one(
            sqlx::query_as::<_, User>(&format!(
                "INSERT INTO users (email, password_hash, first_name, last_name, \
                 date_of_birth, gender, phone) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7) \
                 RETURNING {USER_COLUMNS}"
            ))
            .bind(&email)
            .bind(&new_user.password_hash)
            .bind(&new_user.first_name)
            .bind(&new_user.last_name)
            .bind(new_user.date_of_birth)
            .bind(&new_user.gender)
            .bind(&new_user.phone),
        )
        .await;

    match inserted {
        Ok(user) => {
            tx.commit().await?;
            tracing::info!("Created user account for {}", user.email);
            Ok(user)
        }
        Err(e) if e.is_unique_violation() => {
            tx.rollback().await?;
            Err(AppError::conflict("Email is already registered"))
        }
        Err(e) => {
            tx.rollback().await?;
            Err(e)
        }
    }
}

/// Look up a user by email on the plain pool read path.
pub async fn find_user_by_email(db: &Database, email: &str) -> Result<Option<User>, AppError> {
    let email = normalize_email(email);

    db.fetch_optional(
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email),
    )
    .await
}

/// Attach a reset token to a user row.
///
/// # Returns
///
/// `false` when no row matched the email. The caller must not let that
/// difference show in its response.
pub async fn store_reset_token(
    db: &Database,
    email: &str,
    token: &str,
    expires_at: DateTime<Utc>,
) -> Result<bool, AppError> {
    let email = normalize_email(email);

    let affected = db
        .execute(
            sqlx::query(
                "UPDATE users SET reset_token = $1, reset_token_expires = $2, \
                 updated_at = NOW() WHERE email = $3",
            )
            .bind(token)
            .bind(expires_at)
            .bind(email),
        )
        .await?;

    Ok(affected > 0)
}

/// Find the user holding an unexpired reset token, locking the row for
/// the rest of the transaction so the token cannot be redeemed twice.
pub async fn find_user_by_reset_token(
    tx: &mut TxHandle,
    token: &str,
) -> Result<Option<User>, AppError> {
    tx.fetch_optional(
        sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE reset_token = $1 AND reset_token_expires > NOW() FOR UPDATE"
        ))
        .bind(token),
    )
    .await
}

/// Replace the password digest and clear the reset token columns.
pub async fn apply_password_reset(
    tx: &mut TxHandle,
    email: &str,
    password_hash: &str,
) -> Result<(), AppError> {
    tx.execute(
        sqlx::query(
            "UPDATE users SET password_hash = $1, reset_token = NULL, \
             reset_token_expires = NULL, updated_at = NOW() WHERE email = $2",
        )
        .bind(password_hash)
        .bind(email),
    )
    .await?;

    Ok(())
}
