//! Application Error Types
//!
//! One enum covers every fallible boundary in the server. Variants fall
//! into two groups:
//!
//! - **Caller errors** (`Validation`, the three auth variants, `NotFound`,
//!   `Conflict`) — reported to the caller with a precise status code.
//! - **Infrastructure errors** (`Connection`, `Query`, `Hashing`, `Token`,
//!   `Migration`, `Provider`, `Config`, `Internal`) — logged with their
//!   source chain server-side, reported to the caller as a generic
//!   failure.
//!
//! The three auth variants are deliberately coarse: callers learn that a
//! request was unauthorized, never *why*. An expired token, a tampered
//! token, and a malformed header all produce the same `InvalidSession`
//! response; a wrong password and an unknown email both produce
//! `InvalidCredentials`. This keeps responses useless for credential
//! guessing and account enumeration.

use axum::http::StatusCode;
use thiserror::Error;

/// All errors the server can produce.
///
/// The `Display` string of each variant is the caller-visible message;
/// infrastructure variants keep it generic and carry the real diagnostic
/// in their `source`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Caller-supplied data is malformed or missing required fields.
    #[error("{message}")]
    Validation { message: String },

    /// No bearer credential was presented on a protected route.
    #[error("Authentication required")]
    MissingCredentials,

    /// The presented bearer credential did not verify.
    ///
    /// Covers expired, tampered, and malformed tokens alike; the
    /// distinction is logged, never returned.
    #[error("Invalid or expired session")]
    InvalidSession,

    /// Login failed.
    ///
    /// Covers both "no such user" and "wrong password" so the response
    /// cannot be used to probe which emails are registered.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// A referenced resource does not exist (or is not visible to the
    /// caller).
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// A uniqueness constraint was violated, e.g. signing up with an
    /// email that is already registered.
    #[error("{message}")]
    Conflict { message: String },

    /// The database could not be reached or the pool was exhausted.
    #[error("Database connection failed")]
    Connection {
        #[source]
        source: sqlx::Error,
    },

    /// A statement failed inside the database.
    #[error("Database query failed")]
    Query {
        #[source]
        source: sqlx::Error,
    },

    /// Schema migrations failed at startup.
    #[error("Database migration failed")]
    Migration {
        #[from]
        source: sqlx::migrate::MigrateError,
    },

    /// Password hashing failed (resource exhaustion, invalid cost).
    /// Verification mismatches are not errors and never take this path.
    #[error("Password processing failed")]
    Hashing {
        #[from]
        source: bcrypt::BcryptError,
    },

    /// A session token could not be signed at issuance.
    #[error("Session could not be created")]
    Token {
        #[from]
        source: jsonwebtoken::errors::Error,
    },

    /// The upstream weather provider failed or returned an undecodable
    /// body.
    #[error("Weather provider request failed")]
    Provider {
        #[from]
        source: reqwest::Error,
    },

    /// The process environment is misconfigured. Startup-only.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// An internal invariant was violated. The message is for the log;
    /// callers see only the generic string.
    #[error("Internal server error")]
    Internal { message: String },
}

impl AppError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a not-found error for the named resource
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create a conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Classify a sqlx error into `Connection` or `Query`.
    ///
    /// Pool exhaustion, closed pools, and transport failures mean the
    /// database itself was unreachable; everything else ran a statement
    /// and failed, which is a `Query` error carrying the diagnostic.
    pub fn database(source: sqlx::Error) -> Self {
        match source {
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::WorkerCrashed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)
            | sqlx::Error::Configuration(_) => Self::Connection { source },
            _ => Self::Query { source },
        }
    }

    /// True when this error wraps a Postgres unique-constraint violation.
    ///
    /// Used to turn duplicate-key inserts into `Conflict` responses
    /// without a racy pre-read.
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Query { source: sqlx::Error::Database(db) } if db.code().as_deref() == Some("23505")
        )
    }

    /// HTTP status code for this error
    ///
    /// # Status Code Mapping
    ///
    /// - `Validation` - 400 Bad Request
    /// - `MissingCredentials`, `InvalidSession`, `InvalidCredentials` -
    ///   401 Unauthorized
    /// - `NotFound` - 404 Not Found
    /// - `Conflict` - 409 Conflict
    /// - `Provider` - 502 Bad Gateway
    /// - everything else - 500 Internal Server Error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::MissingCredentials | Self::InvalidSession | Self::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Provider { .. } => StatusCode::BAD_GATEWAY,
            Self::Connection { .. }
            | Self::Query { .. }
            | Self::Migration { .. }
            | Self::Hashing { .. }
            | Self::Token { .. }
            | Self::Config { .. }
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
