//! mDNS device discovery module.
//!
//! Provides announcement verification and an mDNS-backed discovery service.

pub mod mdns;
pub mod service;

pub use mdns::MdnsBrowser;
pub use service::{DeviceFound, DiscoveryService, ServiceAnnouncement};
