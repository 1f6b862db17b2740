//! HTTP Routes
//!
//! Route definitions and router assembly.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs         - Module exports
//! ├── router.rs      - Router assembly, layers, fallback
//! ├── api_routes.rs  - Public and gated route groups
//! └── system.rs      - Healthcheck and servertime handlers
//! ```

/// Public and gated route groups
pub mod api_routes;

/// Router assembly
pub mod router;

/// Healthcheck and servertime handlers
pub mod system;

pub use router::create_router;
