//! Trip Handlers
//!
//! All trip routes sit behind the auth gate; the owning identity comes
//! from the resolved [`CurrentUser`], never from the request itself.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::server::state::AppState;
use crate::trips::db::{self, NewTrip, Trip};

/// Body for POST /api/trips.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTripRequest {
    pub location_name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub place_ids: Vec<String>,
}

/// Handle POST /api/trips
///
/// Creates the trip and attaches any initial places atomically.
///
/// # Errors
///
/// * `400` - missing name or start date, end before start, blank place id
/// * `500` - database failure
pub async fn create_trip(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<CreateTripRequest>,
) -> Result<(StatusCode, Json<Trip>), AppError> {
    let location_name = request
        .location_name
        .as_deref()
        .map(str::trim)
        .unwrap_or_default();
    if location_name.is_empty() {
        return Err(AppError::validation("locationName is required"));
    }

    let start_date = request
        .start_date
        .ok_or_else(|| AppError::validation("startDate is required"))?;
    if let Some(end_date) = request.end_date {
        if end_date < start_date {
            return Err(AppError::validation("endDate must not be before startDate"));
        }
    }

    if request.place_ids.iter().any(|p| p.trim().is_empty()) {
        return Err(AppError::validation("placeIds must not contain blank entries"));
    }

    let trip = db::create_trip_with_places(
        &state.db,
        &user.email,
        NewTrip {
            location_name: location_name.to_string(),
            start_date,
            end_date: request.end_date,
            place_ids: request.place_ids,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(trip)))
}

/// Handle GET /api/trips
pub async fn list_trips(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Trip>>, AppError> {
    let trips = db::list_trips_for_user(&state.db, &user.email).await?;
    Ok(Json(trips))
}

/// Handle GET /api/trips/{trip_id}
pub async fn get_trip(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(trip_id): Path<i64>,
) -> Result<Json<Trip>, AppError> {
    let trip = db::find_trip(&state.db, &user.email, trip_id)
        .await?
        .ok_or_else(|| AppError::not_found("Trip"))?;

    Ok(Json(trip))
}

/// Handle DELETE /api/trips/{trip_id}
pub async fn delete_trip(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(trip_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !db::delete_trip(&state.db, &user.email, trip_id).await? {
        return Err(AppError::not_found("Trip"));
    }

    tracing::info!("Deleted trip {} for {}", trip_id, user.email);
    Ok(StatusCode::NO_CONTENT)
}
