//! Axum router and shared application state.

use axum::routing::{delete, get, post};
use axum::Router;
use skycast_history::HistoryStore;
use skycast_weather::WeatherProvider;

use crate::handlers;

/// State shared by all handlers. Both members are cheap clones: the
/// provider wraps a pooled client and the store holds only a path.
#[derive(Clone)]
pub struct AppState {
    pub provider: WeatherProvider,
    pub history: HistoryStore,
}

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/weather", post(handlers::lookup_weather))
        .route("/api/weather/history", get(handlers::get_history))
        .route("/api/weather/history/{id}", delete(handlers::delete_history))
        .with_state(state)
}
