//! Glimmr CLI - command-line interface for Glimmr light control.
//!
//! Provides terminal access to discovery, status polling and mode control
//! of Glimmr devices, plus management of the saved device list.

mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Discover(args) => commands::run_discover(args, cli.json).await,
        Commands::Status(args) => commands::run_status(args, cli.json).await,
        Commands::Mode(args) => commands::run_mode(args, cli.json).await,
        Commands::Devices(args) => commands::run_devices(args, cli.data_dir, cli.json).await,
        Commands::Refresh => commands::run_refresh(cli.data_dir, cli.json).await,
    }
}
