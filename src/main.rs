//! openweather-mcp - current weather for AI assistants
//!
//! Run with: `openweather-mcp` (serves on stdio). Reads `OPENWEATHER_API_KEY`
//! from the environment or a `.env` file.

use rmcp::{transport::stdio, ServiceExt};
use rmcp_openweather::{WeatherConfig, WeatherServer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine, the variables may come from the host
    dotenvy::dotenv().ok();

    // Initialize tracing (to stderr so it doesn't interfere with stdio transport)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = WeatherConfig::from_env()?;
    if config.api_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY is not set; every lookup will report a fetch failure");
    }

    tracing::info!(api_base = %config.api_base, timeout = ?config.timeout, "Starting openweather-mcp server");

    let server = WeatherServer::new(config);
    let service = server.serve(stdio()).await?;

    // Wait for shutdown
    service.waiting().await?;

    tracing::info!("openweather-mcp server stopped");
    Ok(())
}
