//! Login Handler

use axum::extract::State;
use axum::response::Json;

use crate::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::auth::password::verify_password;
use crate::auth::users::{find_user_by_email, UserProfile};
use crate::error::AppError;
use crate::server::state::AppState;

/// Handle user login
///
/// An unknown email and a wrong password produce the same 401 message,
/// so the endpoint cannot be used to probe which addresses have
/// accounts. The real cause is logged server-side.
///
/// # Errors
///
/// * `400` - missing email or password
/// * `401` - credentials did not match
/// * `500` - database failure
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    let email = request.email.as_deref().map(str::trim).unwrap_or_default();
    let password = request.password.as_deref().unwrap_or_default();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::validation("email and password are required"));
    }

    tracing::info!("Login attempt for email: {}", email);

    let Some(user) = find_user_by_email(&state.db, email).await? else {
        tracing::warn!("Login failed: no account for {}", email);
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash) {
        tracing::warn!("Login failed: password mismatch for {}", user.email);
        return Err(AppError::InvalidCredentials);
    }

    let token = state.tokens.issue(&user.email)?;

    tracing::info!("Login successful for {}", user.email);

    Ok(Json(AuthResponse {
        token,
        user: UserProfile::from(&user),
    }))
}
