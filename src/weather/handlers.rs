//! Forecast Handler

use axum::extract::{Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::geo::{nearest_zone, LatLon, Zone};
use crate::weather::provider::ForecastClient;

/// Query parameters for the forecast endpoint.
#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Response body: the matched area and its current forecast.
#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub area: String,
    pub forecast: String,
    pub timestamp: String,
}

/// Handle GET /api/weather/forecast
///
/// Resolves the caller's coordinates to the nearest forecast area and
/// returns that area's two-hour forecast.
///
/// # Errors
///
/// * `400` - missing or non-finite coordinates
/// * `404` - provider listed no areas, or no reading for the matched area
/// * `502` - provider unreachable or returned an undecodable body
pub async fn forecast(
    State(client): State<ForecastClient>,
    Query(params): Query<ForecastParams>,
) -> Result<Json<ForecastResponse>, AppError> {
    let point = match (params.latitude, params.longitude) {
        (Some(lat), Some(lon)) if lat.is_finite() && lon.is_finite() => LatLon::new(lat, lon),
        _ => {
            return Err(AppError::validation(
                "latitude and longitude are required and must be finite",
            ));
        }
    };

    let envelope = client.two_hour_forecast().await?;

    let zones: Vec<Zone> = envelope
        .data
        .area_metadata
        .iter()
        .map(|area| area.to_zone())
        .collect();

    let nearest = nearest_zone(point, &zones).ok_or_else(|| {
        tracing::warn!("Provider returned no forecast areas");
        AppError::not_found("Forecast area")
    })?;

    let item = envelope
        .data
        .items
        .first()
        .ok_or_else(|| AppError::not_found("Forecast"))?;

    let reading = item
        .forecasts
        .iter()
        .find(|reading| reading.area == nearest.name)
        .ok_or_else(|| {
            tracing::warn!("Provider listed area {} without a reading", nearest.name);
            AppError::not_found("Forecast for the nearest area")
        })?;

    Ok(Json(ForecastResponse {
        area: nearest.name.clone(),
        forecast: reading.forecast.clone(),
        timestamp: item.timestamp.clone(),
    }))
}
