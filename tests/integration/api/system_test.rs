//! System endpoint integration tests
//!
//! The health probe stays 200 whether or not the database answers; the
//! servertime endpoint reads the database clock and fails loudly when it
//! cannot.

use axum::http::StatusCode;
use chrono::DateTime;
use serde_json::Value;

use crate::common::state::{
    live_state, test_server, test_state, UNREACHABLE_DATABASE_URL, UNREACHABLE_WEATHER_URL,
};

#[tokio::test]
async fn test_healthcheck_reports_database_down() {
    let server = test_server(test_state(UNREACHABLE_DATABASE_URL, UNREACHABLE_WEATHER_URL));

    let response = server.get("/healthcheck").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "down");
}

#[tokio::test]
async fn test_servertime_without_database_is_a_server_error() {
    let server = test_server(test_state(UNREACHABLE_DATABASE_URL, UNREACHABLE_WEATHER_URL));

    let response = server.get("/api/servertime").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["message"], "Database connection failed");
}

#[tokio::test]
#[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_healthcheck_reports_database_up() {
    let server = test_server(live_state().await);

    let response = server.get("/healthcheck").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["database"], "up");
}

#[tokio::test]
#[ignore = "requires PostgreSQL at TEST_DATABASE_URL"]
async fn test_servertime_returns_database_clock() {
    let server = test_server(live_state().await);

    let response = server.get("/api/servertime").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let raw = body["servertime"]
        .as_str()
        .expect("servertime should be a string");
    DateTime::parse_from_rfc3339(raw).expect("servertime should be RFC 3339");
}
