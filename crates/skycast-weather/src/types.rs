use serde::{Deserialize, Serialize};

/// Geographic coordinate plus the canonical place name, resolved from a
/// free-text city query. Ephemeral; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub name: String,
}

/// One match from the geocoding endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct GeoMatch {
    pub lat: f64,
    pub lon: f64,
    pub name: String,
}

/// One 3-hour sample from the upstream forecast series. Consumed
/// read-only; reshaping happens in [`crate::forecast`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawForecastPoint {
    /// Sample time, unix seconds.
    pub dt: i64,
    pub main: MainReadings,
    pub weather: Vec<Condition>,
    pub wind: Wind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub humidity: u8,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub icon: String,
    pub description: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

/// Envelope of the forecast endpoint response.
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<RawForecastPoint>,
    pub city: City,
}

#[derive(Debug, Deserialize)]
pub struct City {
    pub name: String,
}

/// One normalized forecast entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastDay {
    /// Calendar date, formatted for display.
    pub date: String,
    /// Rounded to the nearest whole degree.
    pub temperature: i32,
    pub humidity: u8,
    /// Rounded to the nearest whole unit.
    pub wind_speed: i32,
    pub icon: String,
    pub description: String,
}

/// Compact forecast for one city: the current reading followed by at
/// most four future days.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastResult {
    pub city_name: String,
    pub days: Vec<ForecastDay>,
}

/// Weather pipeline errors.
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("city name is empty")]
    EmptyQuery,

    #[error("city not found: {0}")]
    CityNotFound(String),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("forecast contained no data points")]
    EmptyForecast,
}

impl From<reqwest::Error> for WeatherError {
    fn from(err: reqwest::Error) -> Self {
        WeatherError::Upstream(err.to_string())
    }
}
