//! Signup Handler

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use crate::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::auth::password::hash_password;
use crate::auth::users::{create_user, NewUser, UserProfile};
use crate::error::AppError;
use crate::server::state::AppState;

/// Minimum accepted password length, shared with the reset flow.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Handle user signup
///
/// Validates the request, hashes the password, stores the account, and
/// returns a session token alongside the new profile.
///
/// # Errors
///
/// * `400` - missing or malformed fields
/// * `409` - email already registered
/// * `500` - hashing or database failure
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let email = request.email.as_deref().map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(AppError::validation("email is required"));
    }
    if !is_well_formed_email(email) {
        return Err(AppError::validation("email is not a valid address"));
    }

    let password = request.password.as_deref().unwrap_or_default();
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::validation(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    let first_name = request
        .first_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    let last_name = request
        .last_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if first_name.is_empty() || last_name.is_empty() {
        return Err(AppError::validation("firstName and lastName are required"));
    }

    tracing::info!("Signup attempt for email: {}", email);

    let password_hash = hash_password(password)?;

    let user = create_user(
        &state.db,
        NewUser {
            email: email.to_string(),
            password_hash,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            date_of_birth: request.date_of_birth,
            gender: request.gender.filter(|g| !g.trim().is_empty()),
            phone: request.phone.filter(|p| !p.trim().is_empty()),
        },
    )
    .await?;

    let token = state.tokens.issue(&user.email)?;

    tracing::info!("User signed up successfully: {}", user.email);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: UserProfile::from(&user),
        }),
    ))
}

/// Minimal shape check: one `@` with a dotted domain after it. Anything
/// stricter belongs to the mail round trip, not a regex.
fn is_well_formed_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    }
}
