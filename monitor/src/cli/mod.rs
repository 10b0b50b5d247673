//! CLI module for dm-monitor
//!
//! Provides command-line arguments for the monitor server.

use std::path::PathBuf;

use clap::Parser;

/// Data mesh monitor - polls services and data products and serves their health and metrics
#[derive(Parser, Debug, Clone)]
#[command(name = "dm-monitor")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    DM_MONITOR_HOST         Bind address (default: 0.0.0.0)
    DM_MONITOR_PORT         Listen port (default: 8000)
    DM_MONITOR_CONFIG       Configuration file (default: ./config/config.yaml)
    DM_MONITOR_LOG_LEVEL    Log level (default: info)
    DM_MONITOR_LOG_DIR      Directory for daily rolling log files (optional)
    DM_MONITOR_PROXY__HOST  Overrides proxy.host from the configuration file
    DM_MONITOR_PROXY__PORT  Overrides proxy.port from the configuration file
"#)]
pub struct Cli {
    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "DM_MONITOR_HOST")]
    pub host: String,

    /// Listen port
    #[arg(short, long, default_value = "8000", env = "DM_MONITOR_PORT")]
    pub port: u16,

    /// Configuration file (YAML)
    #[arg(
        short,
        long,
        default_value = "./config/config.yaml",
        env = "DM_MONITOR_CONFIG"
    )]
    pub configuration: PathBuf,
}

impl Cli {
    /// Address the HTTP listener binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
