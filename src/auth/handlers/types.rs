//! Request and response types for the auth endpoints.
//!
//! Request fields are `Option` so that a missing field produces this
//! API's 400 envelope with a field-naming message instead of the default
//! body-rejection text. The password-carrying types implement no `Debug`:
//! a plaintext password must have no path into a log line.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::auth::users::UserProfile;

/// Body for `POST /api/auth/signup`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub phone: Option<String>,
}

/// Body for `POST /api/auth/login`.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Body for `POST /api/auth/password-reset`.
#[derive(Debug, Deserialize)]
pub struct PasswordResetRequest {
    pub email: Option<String>,
}

/// Body for `POST /api/auth/password-reset/{token}`.
#[derive(Deserialize)]
pub struct PasswordResetConfirm {
    pub password: Option<String>,
}

/// Successful signup/login payload: a bearer token plus the profile it
/// authenticates.
#[derive(Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}

/// Generic acknowledgement body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
