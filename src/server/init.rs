//! Server Initialization
//!
//! Builds the running application from loaded configuration: connect the
//! pool, apply migrations, derive the token keys, construct the outbound
//! clients, and assemble the router. Startup is strict; anything that
//! fails here aborts the process rather than limping along.

use std::sync::Arc;

use axum::Router;

use crate::auth::sessions::TokenService;
use crate::db::Database;
use crate::error::AppError;
use crate::notify::Mailer;
use crate::routes::create_router;
use crate::server::config::AppConfig;
use crate::server::state::AppState;
use crate::weather::ForecastClient;

/// Create the application router and its shared state.
///
/// The state is returned alongside the router so the caller can close
/// the pool after the server drains.
pub async fn create_app(config: AppConfig) -> Result<(Router, AppState), AppError> {
    tracing::info!("Initializing wayfare server");

    let db = Database::connect(&config).await?;

    tracing::info!("Running database migrations");
    db.migrate().await?;
    tracing::info!("Database migrations complete");

    let tokens = TokenService::new(config.jwt_secret.as_bytes(), config.session_ttl_minutes);
    let weather = ForecastClient::new(&config.weather_api_base_url)?;
    let mailer = match &config.smtp {
        Some(smtp) => Some(Mailer::new(smtp, &config.frontend_url)?),
        None => None,
    };

    let state = AppState {
        db,
        tokens,
        weather,
        mailer,
        config: Arc::new(config),
    };

    Ok((create_router(state.clone()), state))
}
