//! Glimmr core - client-side protocol layer for Glimmr lighting devices.
//!
//! Discovers devices via mDNS, verifies and polls them over their HTTP
//! API, and rate-limits rapid command streams so a device is never
//! flooded. Shared between consumer surfaces (CLI, future GUIs); contains
//! no presentation logic. Network and parse failures never propagate as
//! errors; they are folded into each device's status field.

pub mod device;
pub mod discovery;
pub mod error;
pub mod protocol;
pub mod registry;
pub mod storage;

#[cfg(test)]
pub(crate) mod testutil;

pub use device::dispatch::{CommandSink, RateLimitedDispatcher};
pub use device::state::{
    Device, DeviceField, DeviceMode, DeviceStatus, PropertyChanged, SharedDevice,
};
pub use discovery::{DeviceFound, DiscoveryService, ServiceAnnouncement};
pub use error::{CoreError, QueryError, Result};
pub use protocol::http::DeviceHttp;
pub use registry::{AddOutcome, DeviceRegistry};
pub use storage::DeviceStore;
