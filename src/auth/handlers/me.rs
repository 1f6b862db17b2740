//! Current User Handler

use axum::response::Json;

use crate::auth::users::UserProfile;
use crate::middleware::CurrentUser;

/// Handle GET /api/auth/me
///
/// The auth gate has already verified the token and resolved the user,
/// so this handler only echoes the attached profile back.
pub async fn get_me(user: CurrentUser) -> Json<UserProfile> {
    Json(user.profile)
}
