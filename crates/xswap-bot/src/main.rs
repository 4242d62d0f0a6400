//! Cross-chain swap order submission bot - entry point.

use anyhow::Result;
use clap::Parser;
use tracing::info;

/// Cross-chain swap order submission bot
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via XSWAP_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    xswap_bot::logging::init_logging();

    info!("Starting xswap-bot v{}", env!("CARGO_PKG_VERSION"));

    let config_path = args
        .config
        .or_else(|| std::env::var("XSWAP_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = xswap_bot::AppConfig::from_file(&config_path)?;

    let app = xswap_bot::Application::new(config);
    let report = app.run().await?;

    info!(state = %report.state, "Swap attempt finished");
    Ok(())
}
