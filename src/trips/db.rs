//! Trip Storage
//!
//! Database operations for trips. Creation is the one multi-statement
//! write in the system: the trip row and its attached places land in a
//! single transaction, so a half-created trip is never observable. Reads
//! and deletes are single statements against the pool, always scoped to
//! the owning user's email.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::db::{Database, TxHandle};
use crate::error::AppError;

/// A trip row, as returned to its owner.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: i64,
    pub location_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new trip.
pub struct NewTrip {
    pub location_name: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub place_ids: Vec<String>,
}

const TRIP_COLUMNS: &str = "id, location_name, start_date, end_date, created_at";

/// Insert a trip and attach its places in one transaction.
pub async fn create_trip_with_places(
    db: &Database,
    user_email: &str,
    new_trip: NewTrip,
) -> Result<Trip, AppError> {
    let mut tx = db.begin().await?;

    let trip = match insert_trip(&mut tx, user_email, &new_trip).await {
        Ok(trip) => trip,
        Err(e) => {
            tx.rollback().await?;
            return Err(e);
        }
    };

    if !new_trip.place_ids.is_empty() {
        let rows: Vec<Vec<String>> = new_trip
            .place_ids
            .iter()
            .map(|place_id| {
                vec![
                    user_email.to_string(),
                    trip.id.to_string(),
                    place_id.clone(),
                ]
            })
            .collect();

        let attached = tx
            .execute_batch(
                "INSERT INTO trip_places (user_email, trip_id, place_id) \
                 VALUES ($1, $2::bigint, $3)",
                rows,
            )
            .await;
        if let Err(e) = attached {
            tx.rollback().await?;
            return Err(e);
        }
    }

    tx.commit().await?;
    tracing::info!("Created trip {} for {}", trip.id, user_email);
    Ok(trip)
}

async fn insert_trip(
    tx: &mut TxHandle,
    user_email: &str,
    new_trip: &NewTrip,
) -> Result<Trip, AppError> {
    tx.fetch_one(
        sqlx::query_as::<_, Trip>(&format!(
            "INSERT INTO trips (user_email, location_name, start_date, end_date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {TRIP_COLUMNS}"
        ))
        .bind(user_email)
        .bind(&new_trip.location_name)
        .bind(new_trip.start_date)
        .bind(new_trip.end_date),
    )
    .await
}

/// All trips owned by a user, most recent start first.
pub async fn list_trips_for_user(db: &Database, user_email: &str) -> Result<Vec<Trip>, AppError> {
    db.fetch_all(
        sqlx::query_as::<_, Trip>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips \
             WHERE user_email = $1 ORDER BY start_date DESC, id DESC"
        ))
        .bind(user_email),
    )
    .await
}

/// One trip, scoped to its owner. A trip belonging to someone else is
/// indistinguishable from one that does not exist.
pub async fn find_trip(
    db: &Database,
    user_email: &str,
    trip_id: i64,
) -> Result<Option<Trip>, AppError> {
    db.fetch_optional(
        sqlx::query_as::<_, Trip>(&format!(
            "SELECT {TRIP_COLUMNS} FROM trips WHERE id = $1 AND user_email = $2"
        ))
        .bind(trip_id)
        .bind(user_email),
    )
    .await
}

/// Delete a trip; attached places and expenses cascade.
///
/// # Returns
///
/// `false` when the trip does not exist or is not owned by the caller.
pub async fn delete_trip(db: &Database, user_email: &str, trip_id: i64) -> Result<bool, AppError> {
    let affected = db
        .execute(
            sqlx::query("DELETE FROM trips WHERE id = $1 AND user_email = $2")
                .bind(trip_id)
                .bind(user_email),
        )
        .await?;

    Ok(affected > 0)
}

/// Check trip ownership inside an open transaction, so a write that
/// depends on it cannot race a concurrent delete.
pub(crate) async fn trip_owned(
    tx: &mut TxHandle,
    user_email: &str,
    trip_id: i64,
) -> Result<bool, AppError> {
    let found = tx
        .fetch_optional(
            sqlx::query_as::<_, (i64,)>("SELECT id FROM trips WHERE id = $1 AND user_email = $2")
                .bind(trip_id)
                .bind(user_email),
        )
        .await?;

    Ok(found.is_some())
}
