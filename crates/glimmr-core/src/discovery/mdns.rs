//! mDNS browsing adapter.
//!
//! Translates resolved `_glimmr._tcp` services into plain
//! [`ServiceAnnouncement`] events, keeping the verification loop
//! independent of the mDNS implementation.

use mdns_sd::{ServiceDaemon, ServiceEvent};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::warn;

use crate::discovery::service::ServiceAnnouncement;
use crate::error::DiscoveryError;

/// Service type advertised by Glimmr devices.
pub const SERVICE_TYPE: &str = "_glimmr._tcp.local.";

/// Wrapper around the mDNS daemon for browsing Glimmr announcements.
///
/// There is no internal retry: devices re-announce periodically, which is
/// what drives repeat verification attempts.
pub struct MdnsBrowser {
    daemon: ServiceDaemon,
}

impl MdnsBrowser {
    pub fn new() -> Result<Self, DiscoveryError> {
        let daemon = ServiceDaemon::new().map_err(|e| DiscoveryError::Mdns(e.to_string()))?;
        Ok(Self { daemon })
    }

    /// Start browsing; resolved services arrive as announcements on the
    /// returned channel.
    pub fn browse(&self) -> Result<UnboundedReceiver<ServiceAnnouncement>, DiscoveryError> {
        let events = self
            .daemon
            .browse(SERVICE_TYPE)
            .map_err(|e| DiscoveryError::Mdns(e.to_string()))?;
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            loop {
                match events.recv_async().await {
                    Ok(ServiceEvent::ServiceResolved(info)) => {
                        let announcement = ServiceAnnouncement {
                            addresses: info
                                .get_addresses()
                                .iter()
                                .map(|addr| addr.to_string())
                                .collect(),
                            hostname: info.get_hostname().trim_end_matches('.').to_string(),
                        };
                        if tx.send(announcement).is_err() {
                            break;
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        warn!(error = %e, "mDNS event channel closed");
                        break;
                    }
                }
            }
        });

        Ok(rx)
    }

    /// Stop browsing.
    pub fn stop(&self) {
        if let Err(e) = self.daemon.stop_browse(SERVICE_TYPE) {
            warn!(error = %e, "failed to stop mDNS browse");
        }
    }
}
