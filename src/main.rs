//! framesnap - keyboard-driven window snapping for macOS
//!
//! Command-line entry point: parses arguments, initializes logging and
//! dispatches to the CLI executor.

use clap::Parser;
use framesnap::{
    cli::{FrameSnapCli, FrameSnapCliExecutor},
    config::{SettingsStore, SettingsStoreConfig},
    logging::{init_logging, LogConfig, LogLevel},
    Result,
};
use tracing::{debug, error};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = FrameSnapCli::parse();

    let mut log_config = LogConfig::from_env();
    if cli.verbose {
        log_config.level = LogLevel::Debug;
    }
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e:#}");
    }

    let store = match cli.config {
        Some(config_dir) => SettingsStore::new(SettingsStoreConfig { config_dir }),
        None => SettingsStore::default(),
    };
    debug!("Using settings at {}", store.settings_path().display());

    let executor = FrameSnapCliExecutor::new(store, cli.json);
    if let Err(e) = executor.execute(cli.command).await {
        error!("Command failed: {:#}", e);
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}
