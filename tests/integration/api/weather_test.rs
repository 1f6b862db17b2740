//! Weather forecast integration tests
//!
//! The provider is a wiremock server, so every shape it can answer
//! with, including the broken ones, is driven through the real HTTP
//! client. The database is never touched on this route.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use wiremock::MockServer;

use crate::common::forecast::{forecast_body, mock_provider, mock_provider_with_status};
use crate::common::state::{
    test_server, test_state, UNREACHABLE_DATABASE_URL, UNREACHABLE_WEATHER_URL,
};

const TIMESTAMP: &str = "2024-07-17T14:00:00+08:00";

fn server_against(provider: &MockServer) -> TestServer {
    test_server(test_state(UNREACHABLE_DATABASE_URL, &provider.uri()))
}

#[tokio::test]
async fn test_forecast_returns_nearest_area_reading() {
    let body = forecast_body(
        &[
            ("Ang Mo Kio", 1.3521, 103.8198, "Showers"),
            ("Marina Bay", 1.290, 103.85, "Partly Cloudy (Day)"),
        ],
        TIMESTAMP,
    );
    let provider = mock_provider(body).await;
    let server = server_against(&provider);

    let response = server
        .get("/api/weather/forecast?latitude=1.3521&longitude=103.8198")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["area"], "Ang Mo Kio");
    assert_eq!(body["forecast"], "Showers");
    assert_eq!(body["timestamp"], TIMESTAMP);
}

#[tokio::test]
async fn test_forecast_picks_the_closer_area() {
    let body = forecast_body(
        &[
            ("Ang Mo Kio", 1.3521, 103.8198, "Showers"),
            ("Marina Bay", 1.290, 103.85, "Partly Cloudy (Day)"),
        ],
        TIMESTAMP,
    );
    let provider = mock_provider(body).await;
    let server = server_against(&provider);

    let response = server
        .get("/api/weather/forecast?latitude=1.29&longitude=103.85")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["area"], "Marina Bay");
    assert_eq!(body["forecast"], "Partly Cloudy (Day)");
}

// Two areas sharing a reference coordinate are exactly tied; the
// earlier one in the provider's listing wins, deterministically.
#[tokio::test]
async fn test_forecast_tie_keeps_first_listed_area() {
    let body = forecast_body(
        &[
            ("North Twin", 1.30, 103.80, "Cloudy"),
            ("South Twin", 1.30, 103.80, "Sunny"),
        ],
        TIMESTAMP,
    );
    let provider = mock_provider(body).await;
    let server = server_against(&provider);

    let response = server
        .get("/api/weather/forecast?latitude=1.35&longitude=103.82")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["area"], "North Twin");
    assert_eq!(body["forecast"], "Cloudy");
}

// Validation runs before any provider traffic; a 400 here, not a 502,
// proves the request never left the server.
#[tokio::test]
async fn test_forecast_requires_coordinates() {
    let server = test_server(test_state(UNREACHABLE_DATABASE_URL, UNREACHABLE_WEATHER_URL));

    for query in ["", "?latitude=1.3521", "?longitude=103.8198"] {
        let response = server
            .get(&format!("/api/weather/forecast{query}"))
            .await;

        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "query {query:?} should be rejected"
        );
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            "latitude and longitude are required and must be finite"
        );
    }
}

#[tokio::test]
async fn test_forecast_rejects_non_finite_coordinates() {
    let server = test_server(test_state(UNREACHABLE_DATABASE_URL, UNREACHABLE_WEATHER_URL));

    let response = server
        .get("/api/weather/forecast?latitude=NaN&longitude=103.85")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_forecast_maps_provider_failure_to_bad_gateway() {
    let provider = mock_provider_with_status(500, json!({ "error": "upstream down" })).await;
    let server = server_against(&provider);

    let response = server
        .get("/api/weather/forecast?latitude=1.3521&longitude=103.8198")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
    let body: Value = response.json();
    assert_eq!(body["message"], "Weather provider request failed");
}

#[tokio::test]
async fn test_forecast_with_undecodable_body_is_bad_gateway() {
    let provider = mock_provider(json!({ "weird": true })).await;
    let server = server_against(&provider);

    let response = server
        .get("/api/weather/forecast?latitude=1.3521&longitude=103.8198")
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_forecast_with_no_areas_is_not_found() {
    let provider = mock_provider(forecast_body(&[], TIMESTAMP)).await;
    let server = server_against(&provider);

    let response = server
        .get("/api/weather/forecast?latitude=1.3521&longitude=103.8198")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Forecast area not found");
}

#[tokio::test]
async fn test_forecast_with_no_items_is_not_found() {
    let body = json!({
        "data": {
            "area_metadata": [
                {
                    "name": "Ang Mo Kio",
                    "label_location": { "latitude": 1.3521, "longitude": 103.8198 },
                }
            ],
            "items": [],
        }
    });
    let provider = mock_provider(body).await;
    let server = server_against(&provider);

    let response = server
        .get("/api/weather/forecast?latitude=1.3521&longitude=103.8198")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Forecast not found");
}

#[tokio::test]
async fn test_forecast_without_reading_for_nearest_area_is_not_found() {
    // Metadata lists the area, but the issuance has no reading for it.
    let body = json!({
        "data": {
            "area_metadata": [
                {
                    "name": "Ang Mo Kio",
                    "label_location": { "latitude": 1.3521, "longitude": 103.8198 },
                }
            ],
            "items": [
                {
                    "timestamp": TIMESTAMP,
                    "forecasts": [{ "area": "Bedok", "forecast": "Showers" }],
                }
            ],
        }
    });
    let provider = mock_provider(body).await;
    let server = server_against(&provider);

    let response = server
        .get("/api/weather/forecast?latitude=1.3521&longitude=103.8198")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Forecast for the nearest area not found");
}
