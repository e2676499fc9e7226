//! Environment-backed configuration.
//!
//! Everything the server needs is read once at startup: the upstream API
//! base URL and key, the unit system, the history file path, and the
//! bind address. A missing API key fails fast so a misconfigured
//! deployment never starts serving.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use url::Url;

const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const DEFAULT_HISTORY_PATH: &str = "data/search_history.json";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3001";

/// Unit system requested from the forecast endpoint.
///
/// Fixed at configuration time; not user-selectable per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Value of the upstream `units` query parameter.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Units::Metric => "metric",
            Units::Imperial => "imperial",
        }
    }

    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Units::Metric),
            "imperial" => Ok(Units::Imperial),
            other => bail!("invalid unit system {other:?}, expected \"metric\" or \"imperial\""),
        }
    }
}

/// Upstream weather API settings.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Base URL shared by the geocoding and forecast endpoints.
    pub api_base_url: String,

    /// OpenWeatherMap API key.
    pub api_key: String,

    /// Unit system for temperature and wind speed.
    pub units: Units,
}

/// Full server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Upstream API settings.
    pub weather: WeatherConfig,

    /// Path of the JSON file backing the search history.
    pub history_path: PathBuf,

    /// Address the HTTP server binds to.
    pub bind_addr: SocketAddr,
}

impl Config {
    /// Load configuration from process environment variables.
    ///
    /// # Errors
    /// Fails when `SKYCAST_API_KEY` is missing or empty, or when any
    /// other variable is present but malformed.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_base_url =
            lookup("SKYCAST_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        validate_base_url(&api_base_url)?;

        let api_key = lookup("SKYCAST_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .context("SKYCAST_API_KEY is not set; an OpenWeatherMap API key is required")?;

        let units = match lookup("SKYCAST_UNITS") {
            Some(value) => Units::parse(&value)?,
            None => Units::default(),
        };

        let history_path = lookup("SKYCAST_HISTORY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_HISTORY_PATH));

        let bind_addr = lookup("SKYCAST_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("SKYCAST_BIND_ADDR is not a valid socket address")?;

        Ok(Self {
            weather: WeatherConfig {
                api_base_url,
                api_key,
                units,
            },
            history_path,
            bind_addr,
        })
    }
}

fn validate_base_url(value: &str) -> Result<()> {
    let url =
        Url::parse(value).with_context(|| format!("invalid SKYCAST_API_BASE_URL: {value}"))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        bail!(
            "SKYCAST_API_BASE_URL must use http or https scheme, got: {}",
            url.scheme()
        );
    }

    if url.host().is_none() {
        bail!("SKYCAST_API_BASE_URL must have a host");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_api_key() {
        let config = Config::from_lookup(lookup_from(&[("SKYCAST_API_KEY", "abc123")])).unwrap();
        assert_eq!(config.weather.api_base_url, DEFAULT_BASE_URL);
        assert_eq!(config.weather.api_key, "abc123");
        assert_eq!(config.weather.units, Units::Metric);
        assert_eq!(config.history_path, PathBuf::from(DEFAULT_HISTORY_PATH));
        assert_eq!(config.bind_addr.port(), 3001);
    }

    #[test]
    fn test_missing_api_key_fails() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("SKYCAST_API_KEY"));
    }

    #[test]
    fn test_blank_api_key_fails() {
        let result = Config::from_lookup(lookup_from(&[("SKYCAST_API_KEY", "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_imperial_units() {
        let config = Config::from_lookup(lookup_from(&[
            ("SKYCAST_API_KEY", "abc123"),
            ("SKYCAST_UNITS", "Imperial"),
        ]))
        .unwrap();
        assert_eq!(config.weather.units, Units::Imperial);
        assert_eq!(config.weather.units.as_query_value(), "imperial");
    }

    #[test]
    fn test_invalid_units_fail() {
        let result = Config::from_lookup(lookup_from(&[
            ("SKYCAST_API_KEY", "abc123"),
            ("SKYCAST_UNITS", "kelvin"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_base_url_scheme_fails() {
        let result = Config::from_lookup(lookup_from(&[
            ("SKYCAST_API_KEY", "abc123"),
            ("SKYCAST_API_BASE_URL", "ftp://example.com"),
        ]));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("http or https"));
    }

    #[test]
    fn test_custom_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SKYCAST_API_KEY", "abc123"),
            ("SKYCAST_API_BASE_URL", "http://localhost:9100"),
            ("SKYCAST_HISTORY_PATH", "/tmp/history.json"),
            ("SKYCAST_BIND_ADDR", "0.0.0.0:8080"),
        ]))
        .unwrap();
        assert_eq!(config.weather.api_base_url, "http://localhost:9100");
        assert_eq!(config.history_path, PathBuf::from("/tmp/history.json"));
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[test]
    fn test_invalid_bind_addr_fails() {
        let result = Config::from_lookup(lookup_from(&[
            ("SKYCAST_API_KEY", "abc123"),
            ("SKYCAST_BIND_ADDR", "not-an-addr"),
        ]));
        assert!(result.is_err());
    }
}
