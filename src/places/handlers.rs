//! Place Handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Deserialize;

use crate::error::AppError;
use crate::middleware::CurrentUser;
use crate::places::db::{self, TripPlace};
use crate::server::state::AppState;
use crate::trips;

/// Body for POST /api/trips/{trip_id}/places.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachPlaceRequest {
    pub place_id: Option<String>,
}

/// Handle GET /api/trips/{trip_id}/places
///
/// # Errors
///
/// * `404` - trip absent or owned by someone else
/// * `500` - database failure
pub async fn list_places(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(trip_id): Path<i64>,
) -> Result<Json<Vec<TripPlace>>, AppError> {
    if trips::db::find_trip(&state.db, &user.email, trip_id).await?.is_none() {
        return Err(AppError::not_found("Trip"));
    }

    let places = db::list_places_for_trip(&state.db, &user.email, trip_id).await?;
    Ok(Json(places))
}

/// Handle POST /api/trips/{trip_id}/places
///
/// # Errors
///
/// * `400` - missing or blank place id
/// * `404` - trip absent or owned by someone else
/// * `409` - place already attached
/// * `500` - database failure
pub async fn attach_place(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(trip_id): Path<i64>,
    Json(request): Json<AttachPlaceRequest>,
) -> Result<(StatusCode, Json<TripPlace>), AppError> {
    let place_id = request.place_id.as_deref().map(str::trim).unwrap_or_default();
    if place_id.is_empty() {
        return Err(AppError::validation("placeId is required"));
    }

    let place = db::attach_place(&state.db, &user.email, trip_id, place_id).await?;
    Ok((StatusCode::CREATED, Json(place)))
}

/// Handle DELETE /api/places/{place_id}
///
/// The path id is the attachment row id returned when the place was
/// attached or listed.
pub async fn detach_place(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(attachment_id): Path<i64>,
) -> Result<StatusCode, AppError> {
    if !db::detach_place(&state.db, &user.email, attachment_id).await? {
        return Err(AppError::not_found("Place"));
    }

    Ok(StatusCode::NO_CONTENT)
}
