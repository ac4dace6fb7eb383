//! Verification of service announcements against the live network.
//!
//! The browsing capability yields raw announcements; each candidate is
//! confirmed as a genuine Glimmr device with a status query before being
//! surfaced. Failed candidates are silently dropped; a later
//! re-announcement triggers another attempt.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::device::state::Device;
use crate::discovery::mdns::MdnsBrowser;
use crate::error::DiscoveryError;
use crate::protocol::http::DeviceHttp;

/// Address + hostname event from the service-browsing capability.
#[derive(Debug, Clone)]
pub struct ServiceAnnouncement {
    /// Advertised addresses; only the first is used.
    pub addresses: Vec<String>,
    pub hostname: String,
}

/// A validated device, ready for the registry.
#[derive(Debug)]
pub struct DeviceFound {
    pub device: Device,
    /// Whether the consumer still needs to refresh the device. Validated
    /// announcements arrive freshly queried, so discovery emits `false`.
    pub refresh_needed: bool,
}

/// Build a candidate from an announcement's first advertised address.
/// Announcements without a usable address yield nothing.
pub fn candidate_from_announcement(announcement: &ServiceAnnouncement) -> Option<Device> {
    let address = announcement.addresses.first()?;
    let mut device = Device::new();
    if !device.set_network_address(address) {
        return None;
    }
    device.set_name(&announcement.hostname);
    device.set_name_is_custom(false);
    Some(device)
}

/// Verify announcements as they arrive and emit the genuine devices.
pub async fn verify_announcements(
    http: DeviceHttp,
    mut announcements: UnboundedReceiver<ServiceAnnouncement>,
    found: UnboundedSender<DeviceFound>,
) {
    while let Some(announcement) = announcements.recv().await {
        let Some(mut device) = candidate_from_announcement(&announcement) else {
            continue;
        };
        // Verification doubles as the initial refresh.
        if device.refresh(&http).await {
            debug!(address = %device.network_address(), "validated Glimmr device");
            let event = DeviceFound {
                device,
                refresh_needed: false,
            };
            if found.send(event).is_err() {
                break;
            }
        } else {
            debug!(hostname = %announcement.hostname, "announcement failed verification");
        }
    }
}

/// mDNS-backed discovery of Glimmr devices.
pub struct DiscoveryService {
    http: DeviceHttp,
    browser: MdnsBrowser,
    verify_task: Option<JoinHandle<()>>,
}

impl DiscoveryService {
    pub fn new(http: DeviceHttp) -> Result<Self, DiscoveryError> {
        Ok(Self {
            http,
            browser: MdnsBrowser::new()?,
            verify_task: None,
        })
    }

    /// Begin browsing; validated devices arrive on the returned channel.
    pub fn start(&mut self) -> Result<UnboundedReceiver<DeviceFound>, DiscoveryError> {
        let announcements = self.browser.browse()?;
        let (tx, rx) = mpsc::unbounded_channel();
        self.verify_task = Some(tokio::spawn(verify_announcements(
            self.http.clone(),
            announcements,
            tx,
        )));
        Ok(rx)
    }

    /// Cease browsing and stop the verification task.
    pub fn stop(&mut self) {
        self.browser.stop();
        if let Some(task) = self.verify_task.take() {
            task.abort();
        }
    }
}

impl Drop for DiscoveryService {
    fn drop(&mut self) {
        self.stop();
    }
}
