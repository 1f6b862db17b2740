//! Trips
//!
//! A trip is the unit everything else hangs off: places are attached to
//! a trip and expenses are recorded against one. Trips belong to exactly
//! one user and every query is scoped to that owner.

/// Trip records and database operations
pub mod db;

/// HTTP handlers for the trip endpoints
pub mod handlers;

pub use db::Trip;
pub use handlers::{create_trip, delete_trip, get_trip, list_trips};
