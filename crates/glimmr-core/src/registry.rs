//! Device collection shared by every consumer surface.
//!
//! Keeps one entry per network address, sorted alphabetically by name and
//! address. Entries are only ever removed explicitly; a device that stops
//! answering stays in the collection marked unreachable.

use futures::stream::{self, StreamExt};
use tokio::sync::mpsc::UnboundedSender;

use crate::device::state::{Device, PropertyChanged, SharedDevice};
use crate::protocol::http::DeviceHttp;

/// Concurrent refreshes issued by [`DeviceRegistry::refresh_all`].
const REFRESH_CONCURRENCY: usize = 4;

/// Outcome of [`DeviceRegistry::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new entry was inserted.
    Added,
    /// An entry with the same address existed; its name was overwritten by
    /// the candidate's custom name.
    MergedName,
    /// An entry with the same address existed and was left untouched.
    AlreadyKnown,
}

/// Ordered collection of devices, one entry per network address.
#[derive(Default)]
pub struct DeviceRegistry {
    devices: Vec<SharedDevice>,
    events: Option<UnboundedSender<PropertyChanged>>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry whose devices report changes on the given channel.
    pub fn with_events(events: UnboundedSender<PropertyChanged>) -> Self {
        Self {
            devices: Vec::new(),
            events: Some(events),
        }
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    pub fn devices(&self) -> &[SharedDevice] {
        &self.devices
    }

    /// Add a device, keeping one entry per address.
    ///
    /// A duplicate carrying a custom name renames the existing entry,
    /// which keeps its identity; a duplicate without one is dropped.
    pub async fn add(&mut self, mut candidate: Device) -> AddOutcome {
        if let Some(existing) = self.find(candidate.network_address()).await {
            if candidate.name_is_custom() {
                {
                    let mut device = existing.write().await;
                    device.set_name(candidate.name());
                    device.set_name_is_custom(true);
                }
                self.sort().await;
                return AddOutcome::MergedName;
            }
            return AddOutcome::AlreadyKnown;
        }

        if let Some(events) = &self.events {
            candidate.subscribe(events.clone());
        }
        self.insert_sorted(candidate.into_shared()).await;
        AddOutcome::Added
    }

    /// Look up a device by address.
    pub async fn find(&self, address: &str) -> Option<SharedDevice> {
        for device in &self.devices {
            if device.read().await.network_address() == address {
                return Some(device.clone());
            }
        }
        None
    }

    /// Remove a device by address. Removal is always explicit; failed
    /// polls never remove entries.
    pub async fn remove(&mut self, address: &str) -> bool {
        let mut found = None;
        for (index, device) in self.devices.iter().enumerate() {
            if device.read().await.network_address() == address {
                found = Some(index);
                break;
            }
        }
        match found {
            Some(index) => {
                self.devices.remove(index);
                true
            }
            None => false,
        }
    }

    /// Give a device a custom name and keep the collection sorted.
    pub async fn rename(&mut self, address: &str, name: &str) -> bool {
        let Some(device) = self.find(address).await else {
            return false;
        };
        {
            let mut device = device.write().await;
            device.set_name(name);
            device.set_name_is_custom(true);
        }
        self.sort().await;
        true
    }

    async fn insert_sorted(&mut self, device: SharedDevice) {
        let candidate = device.read().await.clone();
        let mut index = 0;
        while index < self.devices.len() {
            let existing = self.devices[index].read().await;
            if candidate.ordering(&existing).is_le() {
                break;
            }
            index += 1;
        }
        self.devices.insert(index, device);
    }

    /// Re-sort, e.g. after a refresh adopted new device names.
    pub async fn sort(&mut self) {
        let mut keyed = Vec::with_capacity(self.devices.len());
        for device in self.devices.drain(..) {
            let key = {
                let device = device.read().await;
                (
                    device.name().to_string(),
                    device.network_address().to_string(),
                )
            };
            keyed.push((key, device));
        }
        keyed.sort_by(|a, b| a.0.cmp(&b.0));
        self.devices = keyed.into_iter().map(|(_, device)| device).collect();
    }

    /// Refresh every device concurrently. Disabled devices decline inside
    /// `refresh`, so they cost no network traffic.
    pub async fn refresh_all(&self, http: &DeviceHttp) {
        stream::iter(self.devices.iter().cloned())
            .for_each_concurrent(REFRESH_CONCURRENCY, |device| {
                let http = http.clone();
                async move {
                    device.write().await.refresh(&http).await;
                }
            })
            .await;
    }

    /// Plain copies of every device, for persistence or display.
    pub async fn snapshot(&self) -> Vec<Device> {
        let mut devices = Vec::with_capacity(self.devices.len());
        for device in &self.devices {
            devices.push(device.read().await.clone());
        }
        devices
    }

    /// Rebuild the collection from persisted records, applying the same
    /// merge rule as live additions.
    pub async fn load_records(&mut self, records: Vec<Device>) {
        for record in records {
            self.add(record).await;
        }
    }
}
