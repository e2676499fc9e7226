//! Weather lookup pipeline for Skycast.
//!
//! Resolves a free-text city name to coordinates via the OpenWeatherMap
//! geocoding API, fetches the 5-day/3-hour forecast for those
//! coordinates, and reduces the series to a compact shape: one current
//! reading plus at most one noon reading per following day.

pub mod forecast;
pub mod geocode;
pub mod provider;
pub mod types;

pub use provider::WeatherProvider;
pub use types::*;
