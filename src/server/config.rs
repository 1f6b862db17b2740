//! Server Configuration
//!
//! All tunables come from the process environment, read once at startup.
//! `DATABASE_URL` and `JWT_SECRET` are required and startup fails without
//! them; everything else has a sensible default. SMTP is optional as a
//! group: mail is enabled only when all four `SMTP_*` variables are set.
//!
//! Neither config struct implements `Debug`. They hold the signing secret
//! and the SMTP password, and a stray `{:?}` must not be able to put those
//! in a log line.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::error::AppError;

/// SMTP settings for outbound mail.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug))]
pub struct SmtpConfig {
    pub host: String,
    pub username: String,
    pub password: String,
    pub from: String,
}

/// Process-wide configuration, loaded once at startup and shared through
/// application state.
#[derive(Clone)]
#[cfg_attr(test, derive(Debug))]
pub struct AppConfig {
    pub server_port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub session_ttl_minutes: i64,
    pub weather_api_base_url: String,
    pub frontend_url: String,
    pub smtp: Option<SmtpConfig>,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// # Errors
    ///
    /// Returns a config error naming the variable when a required value is
    /// missing or a present value fails to parse.
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            server_port: parse_or("SERVER_PORT", 3000)?,
            database_url: required("DATABASE_URL")?,
            database_max_connections: parse_or("DATABASE_MAX_CONNECTIONS", 10)?,
            jwt_secret: required("JWT_SECRET")?,
            session_ttl_minutes: parse_or("SESSION_TTL_MINUTES", 20)?,
            weather_api_base_url: or_default(
                "WEATHER_API_BASE_URL",
                "https://api-open.data.gov.sg",
            ),
            frontend_url: or_default("FRONTEND_URL", "http://localhost:5173"),
            smtp: load_smtp(),
        })
    }
}

fn required(key: &str) -> Result<String, AppError> {
    env::var(key).map_err(|_| AppError::config(format!("{key} must be set")))
}

fn or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        tracing::info!("{} not set, using default: {}", key, default);
        default.to_string()
    })
}

fn parse_or<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse()
            .map_err(|e| AppError::config(format!("invalid {key} value {raw:?}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Mail needs the full set of SMTP variables; a partial set is treated as
/// unconfigured and logged so the gap is visible at startup.
fn load_smtp() -> Option<SmtpConfig> {
    let keys = ["SMTP_HOST", "SMTP_USERNAME", "SMTP_PASSWORD", "SMTP_FROM"];
    let values: Vec<_> = keys.iter().map(|key| env::var(key).ok()).collect();

    let set = values.iter().filter(|value| value.is_some()).count();
    if set == 0 {
        tracing::info!("SMTP not configured; password reset links will be logged instead");
        return None;
    }
    if set < keys.len() {
        tracing::warn!("Partial SMTP configuration ignored; all four SMTP_* variables are needed");
        return None;
    }

    let mut values = values.into_iter().flatten();
    Some(SmtpConfig {
        host: values.next()?,
        username: values.next()?,
        password: values.next()?,
        from: values.next()?,
    })
}
