//! Data Mesh Monitor Server Entry Point

use clap::Parser;
use dm_monitor::cli::Cli;
use dm_monitor::{bootstrap, logging};
use dm_monitor_common::config::MonitorConfig;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %cli.host,
        port = cli.port,
        configuration = %cli.configuration.display(),
        "Starting data mesh monitor"
    );

    let config = match MonitorConfig::load(&cli.configuration) {
        Ok(config) => config,
        Err(e) => {
            error!(
                configuration = %cli.configuration.display(),
                error = %e,
                "Failed to load configuration"
            );
            std::process::exit(1);
        }
    };
    info!(?config, "Configuration loaded");

    if let Err(e) = bootstrap::run(&cli, config).await {
        error!(error = %e, "Monitor terminated with error");
        std::process::exit(1);
    }

    info!("Terminating data mesh monitor");
}
