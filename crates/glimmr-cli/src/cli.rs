//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use glimmr_core::DeviceMode;

/// Glimmr CLI - command-line interface for Glimmr light control
#[derive(Parser, Debug)]
#[command(name = "glimmr-cli")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Data directory for the saved device list
    #[arg(long, global = true, env = "GLIMMR_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Discover devices on the network
    Discover(DiscoverArgs),

    /// Query the current state of a device
    Status(StatusArgs),

    /// Set the operating mode of a device
    Mode(ModeArgs),

    /// Manage the saved device list
    Devices(DevicesArgs),

    /// Refresh every enabled saved device
    Refresh,
}

// ==================== Discover ====================

#[derive(Args, Debug)]
pub struct DiscoverArgs {
    /// Watch mode - keep printing devices as they are validated
    #[arg(short, long)]
    pub watch: bool,

    /// Discovery duration in seconds (ignored in watch mode)
    #[arg(short, long, default_value = "5")]
    pub duration: u64,
}

// ==================== Status ====================

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Device IP address or hostname
    pub address: String,
}

// ==================== Mode ====================

#[derive(Args, Debug)]
pub struct ModeArgs {
    /// Device IP address or hostname
    pub address: String,

    /// Target mode
    #[arg(value_enum)]
    pub mode: ModeArg,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ModeArg {
    Off,
    Video,
    Audio,
    Ambient,
    Av,
    Stream,
}

impl ModeArg {
    pub fn to_mode(self) -> DeviceMode {
        match self {
            ModeArg::Off => DeviceMode::Off,
            ModeArg::Video => DeviceMode::Video,
            ModeArg::Audio => DeviceMode::Audio,
            ModeArg::Ambient => DeviceMode::Ambient,
            ModeArg::Av => DeviceMode::Av,
            ModeArg::Stream => DeviceMode::Stream,
        }
    }
}

// ==================== Devices ====================

#[derive(Args, Debug)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommands,
}

#[derive(Subcommand, Debug)]
pub enum DevicesCommands {
    /// List saved devices
    List,

    /// Add a device by address
    Add(DeviceAddArgs),

    /// Remove a device by address
    Remove(DeviceTargetArgs),

    /// Rename a device (marks the name as custom)
    Rename(DeviceRenameArgs),

    /// Include a device in refreshes and sends again
    Enable(DeviceTargetArgs),

    /// Hide a device without deleting it
    Disable(DeviceTargetArgs),
}

#[derive(Args, Debug)]
pub struct DeviceAddArgs {
    /// Device IP address or hostname
    pub address: String,

    /// Display name (marks the name as custom)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Skip the initial refresh of the new device
    #[arg(long)]
    pub no_refresh: bool,
}

#[derive(Args, Debug)]
pub struct DeviceTargetArgs {
    /// Device IP address or hostname
    pub address: String,
}

#[derive(Args, Debug)]
pub struct DeviceRenameArgs {
    /// Device IP address or hostname
    pub address: String,

    /// New display name
    pub name: String,
}
