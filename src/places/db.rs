//! Attached-Place Storage
//!
//! A place is an external point-of-interest id attached to a trip. The
//! attach path runs in a transaction that first confirms the trip
//! belongs to the caller, so a place can never land on someone else's
//! trip, and the unique constraint keeps one attachment per place and
//! trip.

use serde::Serialize;

use crate::db::Database;
use crate::error::AppError;
use crate::trips;

/// One place attached to a trip.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TripPlace {
    pub id: i64,
    pub trip_id: i64,
    pub place_id: String,
}

/// Places attached to a trip, in attachment order.
pub async fn list_places_for_trip(
    db: &Database,
    user_email: &str,
    trip_id: i64,
) -> Result<Vec<TripPlace>, AppError> {
    db.fetch_all(
        sqlx::query_as::<_, TripPlace>(
            "SELECT id, trip_id, place_id FROM trip_places \
             WHERE trip_id = $1 AND user_email = $2 ORDER BY id",
        )
        .bind(trip_id)
        .bind(user_email),
    )
    .await
}

/// Attach one place to a trip the caller owns.
///
/// # Errors
///
/// * `NotFound` - trip absent or owned by someone else
/// * `Conflict` - place already attached to this trip
pub async fn attach_place(
    db: &Database,
    user_email: &str,
    trip_id: i64,
    place_id: &str,
) -> Result<TripPlace, AppError> {
    let mut tx = db.begin().await?;

    match trips::db::trip_owned(&mut tx, user_email, trip_id).await {
        Ok(true) => {}
        Ok(false) => {
            tx.rollback().await?;
            return Err(AppError::not_found("Trip"));
        }
        Err(e) => {
            tx.rollback().await?;
            return Err(e);
        }
    }

    let inserted = tx
        .fetch_one(
            sqlx::query_as::<_, TripPlace>(
                "INSERT INTO trip_places (user_email, trip_id, place_id) \
                 VALUES ($1, $2, $3) RETURNING id, trip_id, place_id",
            )
            .bind(user_email)
            .bind(trip_id)
            .bind(place_id),
        )
        .await;

    match inserted {
        Ok(place) => {
            tx.commit().await?;
            tracing::info!("Attached place to trip {} for {}", trip_id, user_email);
            Ok(place)
        }
        Err(e) if e.is_unique_violation() => {
            tx.rollback().await?;
            Err(AppError::conflict("Place is already attached to this trip"))
        }
        Err(e) => {
            tx.rollback().await?;
            Err(e)
        }
    }
}

/// Detach a place by its attachment row id.
///
/// # Returns
///
/// `false` when the attachment does not exist or is not owned by the
/// caller.
pub async fn detach_place(
    db: &Database,
    user_email: &str,
    attachment_id: i64,
) -> Result<bool, AppError> {
    let affected = db
        .execute(
            sqlx::query("DELETE FROM trip_places WHERE id = $1 AND user_email = $2")
                .bind(attachment_id)
                .bind(user_email),
        )
        .await?;

    Ok(affected > 0)
}
