//! Authentication Gate
//!
//! Middleware guarding every route that requires identity. A request
//! walks a fixed ladder:
//!
//! 1. Extract the bearer credential from the `Authorization` header
//! 2. Verify the token's signature and expiry
//! 3. Resolve the token's subject to a live user record
//! 4. Attach the identity to the request and continue
//!
//! The failures stay distinct: a missing or malformed header and a token
//! that fails verification are 401s, a verified token whose user has
//! since disappeared is a 404, and a lookup that fails because the
//! database is down is a 500. A caller holding a bad credential must
//! never be told the backing store is broken, and vice versa.
//!
//! The bearer header is the only credential carrier; cookies are never
//! consulted.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;

use crate::auth::users::{find_user_by_email, UserProfile};
use crate::error::AppError;
use crate::server::state::AppState;

/// The resolved identity of an authenticated request, attached as a
/// request extension by [`require_auth`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub email: String,
    pub profile: UserProfile,
}

/// Authentication middleware
///
/// Rejects the request unless a valid bearer token resolves to an
/// existing user; on success the handler finds a [`CurrentUser`] in the
/// request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(&request).ok_or_else(|| {
        tracing::warn!("Missing or malformed Authorization header");
        AppError::MissingCredentials
    })?;

    let claims = state.tokens.verify(token).ok_or(AppError::InvalidSession)?;

    let user = find_user_by_email(&state.db, &claims.sub)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Valid token for a missing account: {}", claims.sub);
            AppError::not_found("User")
        })?;

    request.extensions_mut().insert(CurrentUser {
        email: user.email.clone(),
        profile: UserProfile::from(&user),
    });

    Ok(next.run(request).await)
}

/// Pull the token out of `Authorization: Bearer <token>`.
fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// Extractor handing handlers the identity resolved by [`require_auth`].
///
/// Usable only on routes behind the gate; elsewhere the extension is
/// absent and extraction fails as a server fault, since that is a
/// routing bug rather than a caller error.
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<CurrentUser>().cloned().ok_or_else(|| {
            tracing::error!("CurrentUser extracted on a route outside the auth gate");
            AppError::internal("route is missing the authentication layer")
        })
    }
}
