//! Authentication API integration tests
//!
//! Validation failures are covered without a database, since they
//! reject before any query runs. Full signup, login, and password-reset
//! flows need PostgreSQL and are marked ignored; run them with
//! `cargo test -- --ignored` against `TEST_DATABASE_URL`.

use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::auth_helpers::{bearer, login, signup, signup_body, unique_email};
use crate::common::state::{
    live_state, test_server, test_state, UNREACHABLE_DATABASE_URL, UNREACHABLE_WEATHER_URL,
};

fn offline_server() -> TestServer {
    test_server(test_state(UNREACHABLE_DATABASE_URL, UNREACHABLE_WEATHER_URL))
}

#[tokio::test]
async fn test_signup_rejects_missing_email() {
    let server = offline_server();

    let response = server.post("/api/auth/signup").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "email is required");
}

#[tokio::test]
async fn test_signup_rejects_malformed_email() {
    let server = offline_server();

    for email in ["no-at-sign", "user@nodot", "@example.com"] {
        let response = server
            .post("/api/auth/signup")
            .json(&signup_body(email, "a sound passphrase"))
            .await;

        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "{email} should be rejected"
        );
        let body: Value = response.json();
        assert_eq!(body["message"], "email is not a valid address");
    }
}

#[tokio::test]
async fn test_signup_rejects_short_password() {
    let server = offline_server();

    let response = server
        .post("/api/auth/signup")
        .json(&signup_body("traveler@example.com", "short"))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "password must be at least 8 characters");
}

#[tokio::test]
async fn test_signup_rejects_missing_names() {
    let server = offline_server();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "email": "traveler@example.com",
            "password": "a sound passphrase",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "firstName and lastName are required");
}

#[tokio::test]
async fn test_login_rejects_missing_fields() {
    let server = offline_server();

    let response = server.post("/api/auth/login").json(&json!({})).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "email and password are required");
}

// Validation passed, so the handler reaches for the pool; the caller
// gets the generic connection message, nothing more specific.
#[tokio::test]
async fn test_signup_with_unreachable_database_is_a_server_error() {
    let server = offline_server();

    let response = server
        .post("/api/auth/signup")
        .json(&signup_body("traveler@example.com", "a sound passphrase"))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Database connection failed");
}

#[tokio::test]
async fn test_reset_request_rejects_blank_email() {
    let server = offline_server();

    let response = server
        .post("/api/auth/password-reset")
        .json(&json!({ "email": "   " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "email is required");
}

#[tokio::test]
async fn test_reset_confirm_rejects_short_password() {
    let server = offline_server();

    let response = server
        .post("/api/auth/password-reset/deadbeef")
        .json(&json!({ "password": "tiny" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["message"], "password must be at least 8 characters");
}

#[tokio::test]
#[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_signup_login_me_roundtrip() {
    let server = test_server(live_state().await);
    let email = unique_email("roundtrip");

    let response = server
        .post("/api/auth/signup")
        .json(&signup_body(&email, "a sound passphrase"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["email"], email.as_str());

    let token = login(&server, &email, "a sound passphrase").await;

    let response = server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let profile: Value = response.json();
    assert_eq!(profile["email"], email.as_str());
    assert_eq!(profile["firstName"], "Ada");
    assert_eq!(profile["lastName"], "Lovelace");
}

#[tokio::test]
#[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_signup_normalizes_email_case() {
    let server = test_server(live_state().await);
    let email = unique_email("case");
    let shouty = email.to_uppercase();

    signup(&server, &shouty, "a sound passphrase").await;

    // The account is reachable under the canonical lowercase form.
    let token = login(&server, &email, "a sound passphrase").await;

    let response = server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(&token))
        .await;
    let profile: Value = response.json();
    assert_eq!(profile["email"], email.as_str());
}

#[tokio::test]
#[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_duplicate_signup_is_a_conflict() {
    let server = test_server(live_state().await);
    let email = unique_email("duplicate");

    signup(&server, &email, "a sound passphrase").await;

    let response = server
        .post("/api/auth/signup")
        .json(&signup_body(&email, "another passphrase"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "Email is already registered");

    // Changing the case does not dodge the uniqueness check.
    let response = server
        .post("/api/auth/signup")
        .json(&signup_body(&email.to_uppercase(), "another passphrase"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CONFLICT);
}

// An attacker probing for accounts must get the same answer for a
// wrong password as for an address that was never registered.
#[tokio::test]
#[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_login_failures_are_indistinguishable() {
    let server = test_server(live_state().await);
    let email = unique_email("probe");
    signup(&server, &email, "a sound passphrase").await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "not the passphrase" }))
        .await;
    let unknown_account = server
        .post("/api/auth/login")
        .json(&json!({ "email": unique_email("nobody"), "password": "anything at all" }))
        .await;

    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_account.status_code(), StatusCode::UNAUTHORIZED);

    let wrong_password: Value = wrong_password.json();
    let unknown_account: Value = unknown_account.json();
    assert_eq!(wrong_password, unknown_account);
}

#[tokio::test]
#[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_profile_omits_unset_optional_fields() {
    let server = test_server(live_state().await);
    let email = unique_email("sparse");
    let token = signup(&server, &email, "a sound passphrase").await;

    let response = server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(&token))
        .await;
    let profile: Value = response.json();

    assert!(profile.get("gender").is_none());
    assert!(profile.get("phone").is_none());
    assert!(profile.get("dateOfBirth").is_none());
    // The digest never leaves the server under any key.
    assert!(profile.get("password").is_none());
    assert!(profile.get("passwordHash").is_none());
}

// Third gate rung: a cryptographically valid token whose account is
// gone resolves to 404, distinct from both 401 and 500.
#[tokio::test]
#[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_me_after_account_removal_is_not_found() {
    let state = live_state().await;
    let server = test_server(state.clone());
    let email = unique_email("ghost");
    let token = signup(&server, &email, "a sound passphrase").await;

    state
        .db
        .execute(sqlx::query("DELETE FROM users WHERE email = $1").bind(&email))
        .await
        .expect("account removal should run");

    let response = server
        .get("/api/auth/me")
        .add_header("Authorization", bearer(&token))
        .await;
    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
#[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_password_reset_flow() {
    let state = live_state().await;
    let server = test_server(state.clone());
    let email = unique_email("reset");
    signup(&server, &email, "the original passphrase").await;

    let response = server
        .post("/api/auth/password-reset")
        .json(&json!({ "email": email }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    // No mail transport in tests; pull the stored token directly.
    let (token,): (Option<String>,) = state
        .db
        .fetch_one(sqlx::query_as("SELECT reset_token FROM users WHERE email = $1").bind(&email))
        .await
        .expect("user row should exist");
    let token = token.expect("reset token should be stored");

    let response = server
        .post(&format!("/api/auth/password-reset/{token}"))
        .json(&json!({ "password": "the replacement passphrase" }))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["message"], "Password has been reset successfully");

    let old_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": email, "password": "the original passphrase" }))
        .await;
    assert_eq!(old_password.status_code(), StatusCode::UNAUTHORIZED);

    login(&server, &email, "the replacement passphrase").await;

    // The token was cleared on redemption; a second attempt fails.
    let replay = server
        .post(&format!("/api/auth/password-reset/{token}"))
        .json(&json!({ "password": "yet another passphrase" }))
        .await;
    assert_eq!(replay.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = replay.json();
    assert_eq!(body["message"], "Invalid or expired reset token");
}

#[tokio::test]
#[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_reset_acknowledgement_is_uniform() {
    let server = test_server(live_state().await);
    let email = unique_email("uniform");
    signup(&server, &email, "a sound passphrase").await;

    let registered = server
        .post("/api/auth/password-reset")
        .json(&json!({ "email": email }))
        .await;
    let unknown = server
        .post("/api/auth/password-reset")
        .json(&json!({ "email": unique_email("unregistered") }))
        .await;

    assert_eq!(registered.status_code(), StatusCode::OK);
    assert_eq!(unknown.status_code(), StatusCode::OK);

    let registered: Value = registered.json();
    let unknown: Value = unknown.json();
    assert_eq!(registered, unknown);
}
