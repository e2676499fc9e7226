//! HTTP access to the OpenWeatherMap endpoints and the full
//! city → forecast pipeline.

use std::time::Duration;

use reqwest::Client;
use skycast_core::config::{Units, WeatherConfig};

use crate::types::{Coordinate, ForecastResponse, ForecastResult, RawForecastPoint, WeatherError};
use crate::{forecast, geocode};

const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Upstream weather client. Holds one connection-pooled [`Client`] with
/// a bounded timeout; cheap to clone and safe to share across
/// concurrent requests (no per-request state is kept on the struct).
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Client,
    base_url: String,
    api_key: String,
    units: Units,
}

impl WeatherProvider {
    /// Build a provider from upstream API settings.
    ///
    /// # Errors
    /// Fails when the underlying HTTP client cannot be constructed.
    pub fn new(config: &WeatherConfig) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            units: config.units,
        })
    }

    /// Resolve a free-text city name to coordinates.
    ///
    /// # Errors
    /// See [`geocode::resolve`].
    pub async fn resolve_city(&self, city: &str) -> Result<Coordinate, WeatherError> {
        geocode::resolve(&self.client, &self.base_url, &self.api_key, city).await
    }

    /// Fetch the raw 3-hour forecast series for a coordinate. The
    /// payload is unwrapped into its point list but not reshaped.
    ///
    /// # Errors
    /// `Upstream` on transport failure, non-success status, or a
    /// malformed payload.
    pub async fn fetch_forecast(
        &self,
        coordinate: &Coordinate,
    ) -> Result<Vec<RawForecastPoint>, WeatherError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("lat", coordinate.latitude.to_string()),
                ("lon", coordinate.longitude.to_string()),
                ("appid", self.api_key.clone()),
                ("units", self.units.as_query_value().to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Upstream(format!(
                "forecast returned status {status}"
            )));
        }

        let payload: ForecastResponse = response
            .json()
            .await
            .map_err(|e| WeatherError::Upstream(format!("invalid forecast payload: {e}")))?;

        tracing::debug!(
            "fetched {} forecast points for {}",
            payload.list.len(),
            coordinate.name
        );

        Ok(payload.list)
    }

    /// Full pipeline: resolve the city, fetch its forecast, normalize.
    ///
    /// # Errors
    /// Any error from the resolver, fetcher, or normalizer.
    pub async fn forecast_for_city(&self, city: &str) -> Result<ForecastResult, WeatherError> {
        let coordinate = self.resolve_city(city).await?;
        let points = self.fetch_forecast(&coordinate).await?;
        forecast::normalize(&points, &coordinate.name)
    }
}
