//! API integration tests
//!
//! Integration tests for all API endpoints.

mod auth_test;
mod system_test;
mod weather_test;
