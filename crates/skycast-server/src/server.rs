//! Server startup and middleware wiring.

use anyhow::{Context, Result};
use skycast_core::Config;
use skycast_history::HistoryStore;
use skycast_weather::WeatherProvider;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::routes::{create_router, AppState};

/// Run the HTTP server until it is shut down.
///
/// # Errors
/// Fails when the provider cannot be built, the bind address is busy,
/// or the accept loop errors out.
pub async fn run(config: Config) -> Result<()> {
    let provider =
        WeatherProvider::new(&config.weather).context("failed to build weather provider")?;
    let history = HistoryStore::new(&config.history_path);

    let app = create_router(AppState { provider, history }).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("Skycast listening on {}", config.bind_addr);
    tracing::info!("history file: {}", config.history_path.display());

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
