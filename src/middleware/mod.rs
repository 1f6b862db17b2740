//! Request Middleware
//!
//! Cross-cutting request handling. Currently the authentication gate,
//! which protects every route that reads or writes user data.

/// Authentication gate and the `CurrentUser` extractor
pub mod auth;

pub use auth::{require_auth, CurrentUser};
