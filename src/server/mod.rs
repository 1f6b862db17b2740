//! Server Module
//!
//! Configuration, shared state, and startup wiring.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs      - Module exports
//! ├── config.rs   - Environment-driven configuration
//! ├── state.rs    - Shared application state
//! └── init.rs     - Pool, migrations, and router assembly
//! ```

/// Environment-driven configuration
pub mod config;

/// Pool, migrations, and router assembly
pub mod init;

/// Shared application state
pub mod state;

pub use config::AppConfig;
pub use init::create_app;
pub use state::AppState;
