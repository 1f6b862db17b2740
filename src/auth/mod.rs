//! Authentication Module
//!
//! Account management and session identity: signup, login, password
//! reset, and the token service the auth gate verifies against.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - User records and database operations
//! ├── password.rs     - bcrypt hashing and verification
//! ├── sessions.rs     - Session token issuance and verification
//! └── handlers/       - HTTP handlers
//!     ├── mod.rs      - Handler exports
//!     ├── types.rs    - Request/response types
//!     ├── signup.rs   - Account creation handler
//!     ├── login.rs    - Credential verification handler
//!     ├── me.rs       - Current user handler
//!     └── reset.rs    - Password reset handlers
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Signup**: profile + password → password hashed → account stored → token returned
//! 2. **Login**: email + password → digest compared → token returned
//! 3. **Me**: bearer token → auth gate resolves the user → profile returned
//! 4. **Reset**: email → mailed token → token + new password → digest replaced
//!
//! # Security
//!
//! - Passwords are bcrypt-hashed before storage; plaintext is never
//!   logged and never stored
//! - Session tokens are signed JWTs with an absolute expiry
//! - Unknown email and wrong password return the same 401 message
//! - Reset requests acknowledge uniformly whether or not the address
//!   has an account

/// User records and database operations
pub mod users;

/// Password hashing and verification
pub mod password;

/// Session token issuance and verification
pub mod sessions;

/// HTTP handlers for the account endpoints
pub mod handlers;

// Re-export commonly used types and handlers
pub use handlers::{confirm_password_reset, get_me, login, request_password_reset, signup};
pub use sessions::{Claims, TokenService};
pub use users::{User, UserProfile};
