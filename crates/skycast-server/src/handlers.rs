//! Request handlers for the weather and history endpoints.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use skycast_history::{HistoryEntry, HistoryStore};
use skycast_weather::ForecastResult;

use crate::error::ApiError;
use crate::routes::AppState;

#[derive(Debug, Deserialize)]
pub struct WeatherRequest {
    pub city: String,
}

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
    /// The history entry for this city (newly created, or the one
    /// already on file when the name was a duplicate).
    pub city: HistoryEntry,
    pub weather: ForecastResult,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /api/weather — resolve a city, fetch and normalize its
/// forecast, and record the search.
pub async fn lookup_weather(
    State(state): State<AppState>,
    Json(request): Json<WeatherRequest>,
) -> Result<Json<WeatherResponse>, ApiError> {
    let weather = state.provider.forecast_for_city(&request.city).await?;

    let city = record_search(&state.history, &weather.city_name).await?;

    tracing::info!("served forecast for {}", weather.city_name);
    Ok(Json(WeatherResponse { city, weather }))
}

/// GET /api/weather/history — all recorded searches, newest first.
pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError> {
    let history = state.history.clone();
    let entries = tokio::task::spawn_blocking(move || history.list()).await??;
    Ok(Json(entries))
}

/// DELETE /api/weather/history/{id} — idempotent delete.
pub async fn delete_history(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    let history = state.history.clone();
    tokio::task::spawn_blocking(move || history.remove(&id)).await??;

    Ok(Json(MessageResponse {
        message: "City removed from history".to_string(),
    }))
}

/// Append the resolved name to the store; on a dedup hit, return the
/// entry already on file so the response shape stays stable.
async fn record_search(store: &HistoryStore, name: &str) -> Result<HistoryEntry, ApiError> {
    let history = store.clone();
    let city = name.to_string();
    let appended = tokio::task::spawn_blocking(move || history.append(&city)).await??;

    if let Some(entry) = appended {
        return Ok(entry);
    }

    let history = store.clone();
    let city = name.to_string();
    let existing = tokio::task::spawn_blocking(move || history.list()).await??;
    existing
        .into_iter()
        .find(|e| e.name == city)
        .ok_or_else(|| ApiError::internal("history entry vanished between append and list"))
}
