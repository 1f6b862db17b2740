//! API Route Definitions
//!
//! Route groups for the HTTP surface, split by whether the auth gate
//! applies.
//!
//! # Routes
//!
//! ## Public
//! - `GET  /healthcheck` - process and database liveness
//! - `GET  /api/servertime` - database clock
//! - `POST /api/auth/signup` - account creation
//! - `POST /api/auth/login` - credential verification
//! - `POST /api/auth/password-reset` - request a reset link
//! - `POST /api/auth/password-reset/{token}` - redeem a reset token
//! - `GET  /api/weather/forecast` - forecast for coordinates
//!
//! ## Protected (bearer token required)
//! - `GET    /api/auth/me` - current profile
//! - `POST   /api/trips`, `GET /api/trips` - create with places / list
//! - `GET    /api/trips/{trip_id}`, `DELETE /api/trips/{trip_id}`
//! - `GET    /api/trips/{trip_id}/places`, `POST /api/trips/{trip_id}/places`
//! - `DELETE /api/places/{place_id}` - detach by attachment id
//! - `GET    /api/trips/{trip_id}/expenses`, `POST /api/trips/{trip_id}/expenses`
//! - `DELETE /api/expenses/{expense_id}`

use axum::middleware;
use axum::routing::{delete, get, post};
use axum::Router;

use crate::auth::{confirm_password_reset, get_me, login, request_password_reset, signup};
use crate::expenses;
use crate::middleware::require_auth;
use crate::places;
use crate::routes::system::{healthcheck, servertime};
use crate::server::state::AppState;
use crate::trips;
use crate::weather;

/// Routes reachable without a session.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/healthcheck", get(healthcheck))
        .route("/api/servertime", get(servertime))
        .route("/api/auth/signup", post(signup))
        .route("/api/auth/login", post(login))
        .route("/api/auth/password-reset", post(request_password_reset))
        .route(
            "/api/auth/password-reset/{token}",
            post(confirm_password_reset),
        )
        .route("/api/weather/forecast", get(weather::forecast))
}

/// Routes behind the auth gate.
///
/// The gate is attached with `route_layer`, so it runs only when one of
/// these routes matches; unknown paths still fall through to the 404
/// handler instead of being challenged for credentials.
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/api/auth/me", get(get_me))
        .route("/api/trips", post(trips::create_trip).get(trips::list_trips))
        .route(
            "/api/trips/{trip_id}",
            get(trips::get_trip).delete(trips::delete_trip),
        )
        .route(
            "/api/trips/{trip_id}/places",
            get(places::list_places).post(places::attach_place),
        )
        .route("/api/places/{place_id}", delete(places::detach_place))
        .route(
            "/api/trips/{trip_id}/expenses",
            get(expenses::list_expenses).post(expenses::create_expense),
        )
        .route("/api/expenses/{expense_id}", delete(expenses::delete_expense))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}
