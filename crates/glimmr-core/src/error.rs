//! Error types for the Glimmr core.

use thiserror::Error;

/// Core error type for shared operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Outcome of a single query against a host.
///
/// Distinguishes "reachable host that is not running the Glimmr API" from
/// "host we could not reach at all". Callers fold both onto the device's
/// status field rather than propagating them further.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The host answered with a non-success HTTP status (e.g. 404).
    #[error("host answered but is not a Glimmr device")]
    NotADevice,

    /// Timeout, refused connection, DNS failure or any other transport error.
    #[error("connection failed: {0}")]
    Connection(String),
}

/// Discovery errors
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("mDNS error: {0}")]
    Mdns(String),
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
