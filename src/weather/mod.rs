//! Weather Forecasts
//!
//! The one outbound integration: Singapore's data.gov.sg two-hour
//! forecast, keyed by coordinates the frontend sends from the device.
//! The provider reports by named area, so the server picks the area
//! whose representative point is nearest the caller.

/// HTTP handler for the forecast endpoint
pub mod handlers;

/// Client for the data.gov.sg forecast API
pub mod provider;

pub use handlers::forecast;
pub use provider::ForecastClient;
