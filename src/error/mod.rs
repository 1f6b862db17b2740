//! Application Error Module
//!
//! Defines the error taxonomy used across handlers, the data-access core,
//! and the auth layer, plus the conversion into HTTP responses.
//!
//! # Module Structure
//!
//! - **`types`** - The `AppError` enum, constructors, and status mapping
//! - **`conversion`** - `IntoResponse` so handlers can return `AppError`
//!   directly
//!
//! # Classification
//!
//! Caller-facing failures (validation, auth, not-found, conflict) carry
//! precise statuses and messages. Infrastructure failures (connection,
//! query, hashing, token signing, upstream provider) keep their full
//! diagnostic server-side and surface only a generic message, so internals
//! never leak through the API boundary.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::AppError;
