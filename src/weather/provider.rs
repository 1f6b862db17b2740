//! Weather Provider Client
//!
//! Thin HTTP client for the data.gov.sg real-time weather API. This
//! module owns transport only: the base endpoint, a request timeout, and
//! decoding the provider's envelope. Anything that goes wrong here is a
//! `Provider` error, which the boundary maps to 502; provider trouble is
//! not this server's fault and must not read as a 500.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use crate::error::AppError;
use crate::geo::{LatLon, Zone};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// The provider's two-hour forecast envelope, trimmed to the fields the
/// server reads.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastEnvelope {
    pub data: ForecastData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastData {
    pub area_metadata: Vec<AreaMetadata>,
    pub items: Vec<ForecastItem>,
}

/// A named forecast area and its representative coordinate.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaMetadata {
    pub name: String,
    pub label_location: LabelLocation,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LabelLocation {
    pub latitude: f64,
    pub longitude: f64,
}

/// One forecast issuance: a timestamp and the per-area readings.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastItem {
    pub timestamp: String,
    pub forecasts: Vec<AreaForecast>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AreaForecast {
    pub area: String,
    pub forecast: String,
}

impl AreaMetadata {
    /// View this area as a zone for nearest-match selection.
    pub fn to_zone(&self) -> Zone {
        Zone {
            name: self.name.clone(),
            location: LatLon::new(self.label_location.latitude, self.label_location.longitude),
        }
    }
}

/// HTTP client for the forecast API. Cheap to clone.
#[derive(Clone)]
pub struct ForecastClient {
    http: Client,
    base_url: String,
}

impl ForecastClient {
    /// Build a client against the given base URL.
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Fetch the current two-hour forecast.
    ///
    /// # Errors
    ///
    /// `Provider` when the request fails, times out, returns a non-2xx
    /// status, or the body does not decode.
    pub async fn two_hour_forecast(&self) -> Result<ForecastEnvelope, AppError> {
        let url = format!("{}/v2/real-time/api/two-hr-forecast", self.base_url);
        tracing::debug!("Fetching forecast from {}", url);

        let response = self.http.get(&url).send().await?;
        let envelope = response
            .error_for_status()?
            .json::<ForecastEnvelope>()
            .await?;

        Ok(envelope)
    }
}
