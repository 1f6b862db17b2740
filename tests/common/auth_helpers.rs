//! Authentication test helpers
//!
//! Builders for signup bodies, flows that register and log in real
//! accounts, and token factories for driving the auth gate's failure
//! paths.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use uuid::Uuid;
use wayfare::auth::sessions::TokenService;

use crate::common::state::TEST_JWT_SECRET;

/// A fresh address per call, so live-database tests never collide.
pub fn unique_email(prefix: &str) -> String {
    format!("{}-{}@example.com", prefix, Uuid::new_v4())
}

/// A complete, valid signup body for the given credentials.
pub fn signup_body(email: &str, password: &str) -> serde_json::Value {
    json!({
        "email": email,
        "password": password,
        "firstName": "Ada",
        "lastName": "Lovelace",
    })
}

/// Register an account and return the session token from the response.
pub async fn signup(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/signup")
        .json(&signup_body(email, password))
        .await;

    assert_eq!(
        response.status_code(),
        StatusCode::CREATED,
        "signup failed: {}",
        response.text()
    );
    let body: serde_json::Value = response.json();
    body["token"]
        .as_str()
        .expect("signup response should carry a token")
        .to_string()
}

/// Log in and return the session token from the response.
pub async fn login(server: &TestServer, email: &str, password: &str) -> String {
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": password }))
        .await;

    assert_eq!(
        response.status_code(),
        StatusCode::OK,
        "login failed: {}",
        response.text()
    );
    let body: serde_json::Value = response.json();
    body["token"]
        .as_str()
        .expect("login response should carry a token")
        .to_string()
}

/// A token signed with the server's secret and a future expiry.
pub fn valid_token(email: &str) -> String {
    TokenService::new(TEST_JWT_SECRET.as_bytes(), 20)
        .issue(email)
        .expect("token issuance should succeed")
}

/// A token signed with the server's secret but already expired.
pub fn expired_token(email: &str) -> String {
    TokenService::new(TEST_JWT_SECRET.as_bytes(), -5)
        .issue(email)
        .expect("token issuance should succeed")
}

/// A well-formed token signed with a secret the server does not hold.
pub fn foreign_token(email: &str) -> String {
    TokenService::new(b"some-other-secret", 20)
        .issue(email)
        .expect("token issuance should succeed")
}

/// Authorization header value for a bearer token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
