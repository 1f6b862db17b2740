//! Authentication Handlers Module
//!
//! HTTP handlers for the account endpoints, organized into focused
//! submodules.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports
//! ├── types.rs    - Request and response types
//! ├── signup.rs   - Account creation handler
//! ├── login.rs    - Credential verification handler
//! ├── me.rs       - Current user handler
//! └── reset.rs    - Password reset handlers
//! ```
//!
//! # Handlers
//!
//! - **`signup`** - POST /api/auth/signup
//! - **`login`** - POST /api/auth/login
//! - **`get_me`** - GET /api/auth/me (behind the auth gate)
//! - **`request_password_reset`** - POST /api/auth/password-reset
//! - **`confirm_password_reset`** - POST /api/auth/password-reset/{token}

/// Request and response types
pub mod types;

/// Signup handler
pub mod signup;

/// Login handler
pub mod login;

/// Get current user handler
pub mod me;

/// Password reset handlers
pub mod reset;

// Re-export commonly used types
pub use types::{AuthResponse, LoginRequest, MessageResponse, SignupRequest};

// Re-export handlers
pub use login::login;
pub use me::get_me;
pub use reset::{confirm_password_reset, request_password_reset};
pub use signup::signup;
