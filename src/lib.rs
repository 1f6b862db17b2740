//! Wayfare - Travel Planning Backend
//!
//! Wayfare is the API backend for a travel-planning frontend: accounts
//! and sessions, trips with attached places and expenses, and a weather
//! forecast looked up by coordinates against Singapore's data.gov.sg
//! real-time API.
//!
//! # Module Structure
//!
//! - **`auth`** - Accounts, password hashing, session tokens, and the
//!   auth HTTP handlers
//! - **`db`** - Connection pool and the transaction handle every
//!   multi-statement write goes through
//! - **`error`** - The application error taxonomy and its HTTP mapping
//! - **`geo`** - Haversine distance and nearest-zone selection
//! - **`middleware`** - The authentication gate
//! - **`notify`** - Outbound SMTP mail
//! - **`routes`** - Route groups and router assembly
//! - **`server`** - Configuration, shared state, startup wiring
//! - **`trips`**, **`places`**, **`expenses`** - The travel domain
//! - **`weather`** - Forecast provider client and handler
//!
//! # Request Lifecycle
//!
//! A request enters through the router, passes the tracing and CORS
//! layers, and, on gated routes, the auth gate, which verifies the
//! bearer token and attaches the resolved user. Handlers validate, call
//! into the domain modules, and return either a JSON body or an
//! [`error::AppError`], which the boundary renders as a JSON envelope
//! with the right status code.

/// Accounts, sessions, and auth handlers
pub mod auth;

/// Connection pool and transaction handles
pub mod db;

/// Error taxonomy and HTTP mapping
pub mod error;

/// Expense tracking
pub mod expenses;

/// Distance math and nearest-zone selection
pub mod geo;

/// Request middleware
pub mod middleware;

/// Outbound mail
pub mod notify;

/// Places attached to trips
pub mod places;

/// Route groups and router assembly
pub mod routes;

/// Configuration, state, and startup
pub mod server;

/// Trip management
pub mod trips;

/// Weather forecast integration
pub mod weather;

pub use error::AppError;
