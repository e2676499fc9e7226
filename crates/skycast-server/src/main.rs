use anyhow::Result;
use skycast_core::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up a local .env before reading configuration.
    dotenvy::dotenv().ok();

    skycast_core::init()?;

    let config = Config::from_env()?;
    skycast_server::server::run(config).await
}
