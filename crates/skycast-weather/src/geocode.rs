//! Forward geocoding: resolve a free-text city name to coordinates via
//! the OpenWeatherMap direct geocoding endpoint.
//!
//! The resolver is a stateless function taking every input as an
//! explicit parameter, so it is safe to share across concurrent
//! requests.

use reqwest::Client;

use crate::types::{Coordinate, GeoMatch, WeatherError};

/// Resolve `city` to the first geocoding match.
///
/// Empty or whitespace-only input fails before any network call. When
/// the upstream returns several matches only the first is used; no
/// ranking or disambiguation.
///
/// # Errors
/// `EmptyQuery` for blank input, `CityNotFound` when the upstream has
/// zero matches, `Upstream` for transport failures, non-success
/// statuses, and malformed payloads.
pub async fn resolve(
    client: &Client,
    base_url: &str,
    api_key: &str,
    city: &str,
) -> Result<Coordinate, WeatherError> {
    let query = city.trim();
    if query.is_empty() {
        return Err(WeatherError::EmptyQuery);
    }

    let url = format!("{}/geo/1.0/direct", base_url.trim_end_matches('/'));
    let response = client
        .get(&url)
        .query(&[("q", query), ("limit", "1"), ("appid", api_key)])
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(WeatherError::Upstream(format!(
            "geocoding returned status {status}"
        )));
    }

    let matches: Vec<GeoMatch> = response
        .json()
        .await
        .map_err(|e| WeatherError::Upstream(format!("invalid geocoding payload: {e}")))?;

    let Some(first) = matches.into_iter().next() else {
        return Err(WeatherError::CityNotFound(query.to_string()));
    };

    tracing::debug!(
        "resolved {:?} to {} ({}, {})",
        query,
        first.name,
        first.lat,
        first.lon
    );

    Ok(Coordinate {
        latitude: first.lat,
        longitude: first.lon,
        name: first.name,
    })
}
