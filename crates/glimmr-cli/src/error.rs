//! Error types for the Glimmr CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific
//! variants.

use glimmr_core::error::{CoreError, DiscoveryError, StorageError};
use thiserror::Error;

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NETWORK_ERROR: i32 = 2;
    pub const DEVICE_ERROR: i32 = 3;
    pub const INVALID_ARGS: i32 = 4;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("Core error: {0}")]
    Core(#[from] CoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No devices found")]
    NoDevicesFound,

    #[error("Unknown device: {0}")]
    UnknownDevice(String),

    #[error("Device is unreachable: {0}")]
    Unreachable(String),

    #[error("Not a Glimmr device: {0}")]
    NotADevice(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Core(_) => exit_codes::GENERAL_ERROR,
            CliError::Io(_) => exit_codes::GENERAL_ERROR,
            CliError::InvalidArgument(_) => exit_codes::INVALID_ARGS,
            CliError::NoDevicesFound => exit_codes::GENERAL_ERROR,
            CliError::UnknownDevice(_) => exit_codes::DEVICE_ERROR,
            CliError::Unreachable(_) => exit_codes::NETWORK_ERROR,
            CliError::NotADevice(_) => exit_codes::DEVICE_ERROR,
        }
    }
}

// Conversions from core error subtypes to CliError
impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        CliError::Core(CoreError::Storage(e))
    }
}

impl From<DiscoveryError> for CliError {
    fn from(e: DiscoveryError) -> Self {
        CliError::Core(CoreError::Discovery(e))
    }
}

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
