//! Password Reset Handlers
//!
//! Two-step flow: request a reset link by email, then redeem the mailed
//! token with a new password. The request step acknowledges identically
//! whether or not the email has an account, and whether or not the mail
//! went out, so the endpoint cannot be used to enumerate addresses.

use axum::extract::{Path, State};
use axum::response::Json;
use chrono::{Duration, Utc};
use rand::RngCore;

use crate::auth::handlers::signup::MIN_PASSWORD_LENGTH;
use crate::auth::handlers::types::{MessageResponse, PasswordResetConfirm, PasswordResetRequest};
use crate::auth::password::hash_password;
use crate::auth::users::{apply_password_reset, find_user_by_reset_token, store_reset_token};
use crate::error::AppError;
use crate::server::state::AppState;

const RESET_TOKEN_BYTES: usize = 32;
const RESET_TOKEN_TTL_HOURS: i64 = 1;

/// Handle POST /api/auth/password-reset
///
/// Stores a one-hour reset token when the email has an account and mails
/// the link. The 200 acknowledgement is uniform across "no such user"
/// and "mail failed"; only a database fault breaks the pattern, and that
/// fails for every address equally.
pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(request): Json<PasswordResetRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let email = request.email.as_deref().map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(AppError::validation("email is required"));
    }

    let token = generate_reset_token();
    let expires_at = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);

    if store_reset_token(&state.db, email, &token, expires_at).await? {
        match &state.mailer {
            Some(mailer) => mailer.send_reset_link(email, &token).await,
            None => {
                // Dev fallback when SMTP is unconfigured: surface the link
                // to the operator instead of dropping it.
                tracing::info!(
                    "Mail transport not configured; reset link for {}: {}/reset-password/{}",
                    email,
                    state.config.frontend_url,
                    token
                );
            }
        }
    } else {
        tracing::debug!("Password reset requested for an address without an account");
    }

    Ok(Json(MessageResponse::new(
        "If that email is registered, a reset link has been sent",
    )))
}

/// Handle POST /api/auth/password-reset/{token}
///
/// Redeems a mailed token. The lookup and the password update run in one
/// transaction with the user row locked in between, so a token can be
/// redeemed at most once even under concurrent attempts.
///
/// # Errors
///
/// * `400` - password too short, or token unknown/expired
/// * `500` - hashing or database failure
pub async fn confirm_password_reset(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Json(request): Json<PasswordResetConfirm>,
) -> Result<Json<MessageResponse>, AppError> {
    let password = request.password.as_deref().unwrap_or_default();
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    // Hash before the transaction opens; bcrypt is slow and must not
    // hold a pooled connection while it runs.
    let password_hash = hash_password(password)?;

    let mut tx = state.db.begin().await?;

    let Some(user) = find_user_by_reset_token(&mut tx, &token).await? else {
        tx.rollback().await?;
        return Err(AppError::validation("Invalid or expired reset token"));
    };

    apply_password_reset(&mut tx, &user.email, &password_hash).await?;
    tx.commit().await?;

    tracing::info!("Password reset completed for {}", user.email);

    Ok(Json(MessageResponse::new(
        "Password has been reset successfully",
    )))
}

/// 32 random bytes, hex-encoded: unguessable and URL-safe.
fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
