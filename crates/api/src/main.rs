//! AquaCare Server - Main Entry Point

use anyhow::Context;
use api::{config::DEFAULT_CONFIG_FILE, run_server, telemetry::init_logging, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config_file =
        std::env::var("AQUACARE_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    let config = AppConfig::load(&config_file).context("loading configuration")?;

    init_logging(&config.log_filter, config.log_json);
    info!("=== AquaCare Server v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(config).await
}
