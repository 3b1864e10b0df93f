use anyhow::Result;
use sibyl_rust::{config, server};
use tracing::info;

/// Set up JSON logging. The environment (`RUST_LOG`) wins over the config
/// file; an unknown level aborts startup instead of silently defaulting.
fn init_logging(config_level: &str) -> Result<()> {
    let level = std::env::var("RUST_LOG").unwrap_or_else(|_| config_level.to_string());

    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| level.parse().unwrap()),
        )
        .json()
        .init();

    info!("Logging initialized at level: {}", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(&config.server.logs.level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    info!("Starting Sibyl gateway");

    server::run(config).await?;

    Ok(())
}
