//! Application State Management
//!
//! The shared state handed to every handler: the database, the token
//! service, the forecast client, the optional mailer, and the loaded
//! configuration. Everything inside is cheaply cloneable, so the state
//! itself clones per-request without ceremony.
//!
//! `FromRef` impls let handlers extract just the piece they use, which
//! keeps signatures honest about their dependencies.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::auth::sessions::TokenService;
use crate::db::Database;
use crate::notify::Mailer;
use crate::server::config::AppConfig;
use crate::weather::ForecastClient;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub tokens: TokenService,
    pub weather: ForecastClient,
    pub mailer: Option<Mailer>,
    pub config: Arc<AppConfig>,
}

/// Allows extracting the database from application state
impl FromRef<AppState> for Database {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

/// Allows extracting the token service from application state
impl FromRef<AppState> for TokenService {
    fn from_ref(state: &AppState) -> Self {
        state.tokens.clone()
    }
}

/// Allows extracting the forecast client from application state
impl FromRef<AppState> for ForecastClient {
    fn from_ref(state: &AppState) -> Self {
        state.weather.clone()
    }
}

/// Allows extracting the optional mailer from application state
impl FromRef<AppState> for Option<Mailer> {
    fn from_ref(state: &AppState) -> Self {
        state.mailer.clone()
    }
}

/// Allows extracting the configuration from application state
impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
