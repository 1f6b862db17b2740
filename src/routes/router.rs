//! Router Configuration
//!
//! Combines the route groups into the single router the server binds:
//! public routes merged with the gated group, a JSON 404 fallback, and
//! the CORS and tracing layers on the outside so they see every request.

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::routes::api_routes::{protected_routes, public_routes};
use crate::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured router ready to serve requests
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state);

    public_routes()
        .merge(protected_routes(state.clone()))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// CORS for the browser frontend: one allowed origin, taken from
/// configuration.
fn cors_layer(state: &AppState) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION]);

    match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => cors.allow_origin(origin),
        Err(_) => {
            tracing::warn!(
                "FRONTEND_URL is not a usable origin; browsers will be refused by CORS"
            );
            cors
        }
    }
}

/// JSON 404 for unmatched paths, same envelope as every other error.
async fn not_found() -> AppError {
    AppError::not_found("Route")
}
