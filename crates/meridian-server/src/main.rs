//! Meridian fund analytics server entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use meridian_data::{CsvFundSource, CsvPriceSource, EmptyPriceSource, PriceSource};
use meridian_engine::StrategyRegistry;
use meridian_server::{AppState, Server, ServerConfig, StrategyProfiles};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,meridian=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Meridian Fund Analytics Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/meridian.toml".to_string());

    let config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    // Fund data comes from per-strategy CSV files under the data directory
    let fund_source = Arc::new(CsvFundSource::new(&config.data_dir));

    // Prices come from a CSV file when configured; otherwise component
    // returns degrade to zero (in production plug a real provider here)
    let prices: Arc<dyn PriceSource> = match &config.prices_file {
        Some(path) => Arc::new(CsvPriceSource::new(path)?),
        None => Arc::new(EmptyPriceSource),
    };

    // Static strategy profile content
    let profiles = match &config.profiles_file {
        Some(path) => StrategyProfiles::from_file(path)?,
        None => StrategyProfiles::default(),
    };

    let state = Arc::new(AppState {
        registry: Arc::new(StrategyRegistry::new(fund_source)),
        prices,
        profiles,
    });

    // Start server
    let server = Server::new(config, state);
    server.start().await?;

    Ok(())
}
