//! Vehicle Valuation Service - Main Entry Point

use api::{init_logging, run_server, AppConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1);
    let config = AppConfig::load(config_path.as_deref())?;
    init_logging(config.log_level()?)?;

    info!("=== Vehicle Valuation Service v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Model artifact: {}", config.model.artifact_path.display());

    run_server(config).await?;

    Ok(())
}
