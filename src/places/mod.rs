//! Places
//!
//! External point-of-interest ids attached to trips. The server stores
//! only the opaque id; details live with the provider the frontend
//! queries.

/// Attachment records and database operations
pub mod db;

/// HTTP handlers for the place endpoints
pub mod handlers;

pub use db::TripPlace;
pub use handlers::{attach_place, detach_place, list_places};
