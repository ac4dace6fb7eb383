//! Device state and command logic.
//!
//! A [`Device`] is the per-light value object: network address, display
//! name, enabled flag and the status/mode snapshot of the last query.
//! Sending a command folds the network outcome into that snapshot; nothing
//! here ever propagates a network failure as an error.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::QueryError;
use crate::protocol::http::DeviceHttp;
use crate::protocol::response::parse_state_response;

/// Address of a device running its own access point.
pub const DEFAULT_ADDRESS: &str = "10.41.0.1";

/// Shortest address accepted by [`Device::set_network_address`].
const MIN_ADDRESS_LEN: usize = 3;

/// Reachability/parse outcome of the most recent query, independent of the
/// enabled flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceStatus {
    /// Last query answered with a valid payload (or none was made yet).
    #[default]
    Default,
    /// Last query hit a timeout or transport failure.
    Unreachable,
    /// Last query answered with a protocol mismatch or malformed payload.
    Error,
}

impl DeviceStatus {
    pub fn display_name(self) -> &'static str {
        match self {
            DeviceStatus::Default => "OK",
            DeviceStatus::Unreachable => "Offline",
            DeviceStatus::Error => "Error",
        }
    }
}

/// Operating mode of a light.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DeviceMode {
    #[default]
    Off,
    Video,
    Audio,
    Ambient,
    Av,
    Stream,
}

impl DeviceMode {
    /// Wire representation, as used by the `?mode=` query parameter.
    pub fn as_i64(self) -> i64 {
        match self {
            DeviceMode::Off => 0,
            DeviceMode::Video => 1,
            DeviceMode::Audio => 2,
            DeviceMode::Ambient => 3,
            DeviceMode::Av => 4,
            DeviceMode::Stream => 5,
        }
    }

    /// Parse the wire representation; values outside 0..=5 are rejected.
    pub fn from_i64(value: i64) -> Option<Self> {
        match value {
            0 => Some(DeviceMode::Off),
            1 => Some(DeviceMode::Video),
            2 => Some(DeviceMode::Audio),
            3 => Some(DeviceMode::Ambient),
            4 => Some(DeviceMode::Av),
            5 => Some(DeviceMode::Stream),
            _ => None,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            DeviceMode::Off => "Off",
            DeviceMode::Video => "Video",
            DeviceMode::Audio => "Audio",
            DeviceMode::Ambient => "Ambient",
            DeviceMode::Av => "AV",
            DeviceMode::Stream => "Stream",
        }
    }
}

/// Field named in a [`PropertyChanged`] notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceField {
    Name,
    Status,
    Mode,
    Enabled,
}

/// Change notification emitted to a subscribed consumer (registry, UI).
#[derive(Debug, Clone)]
pub struct PropertyChanged {
    /// Network address of the device that changed.
    pub address: String,
    pub field: DeviceField,
    /// New value, rendered as text.
    pub value: String,
}

/// Shared handle for consumers that mutate a device concurrently.
///
/// Updates are last-write-wins snapshots, so interleaved refresh and
/// command responses stay safe behind the lock.
pub type SharedDevice = Arc<RwLock<Device>>;

/// Prefix `http://` unless the address already carries an explicit scheme.
fn compose_base_url(address: &str) -> String {
    if address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{}", address)
    }
}

/// One controllable Glimmr light.
///
/// Only the address, name, custom-name flag and enabled flag are
/// persisted; status and mode are runtime snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(rename = "address")]
    network_address: String,
    #[serde(default)]
    name: String,
    #[serde(default = "default_true")]
    name_is_custom: bool,
    #[serde(default = "default_true")]
    enabled: bool,
    #[serde(skip)]
    status: DeviceStatus,
    #[serde(skip)]
    mode: DeviceMode,
    #[serde(skip)]
    events: Option<UnboundedSender<PropertyChanged>>,
}

fn default_true() -> bool {
    true
}

impl Default for Device {
    fn default() -> Self {
        Self {
            network_address: DEFAULT_ADDRESS.to_string(),
            name: String::new(),
            name_is_custom: true,
            enabled: true,
            status: DeviceStatus::default(),
            mode: DeviceMode::default(),
            events: None,
        }
    }
}

impl Device {
    /// Create a device pointing at the default access-point address.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn network_address(&self) -> &str {
        &self.network_address
    }

    /// Accept a new address; empty or too-short values are rejected.
    pub fn set_network_address(&mut self, address: &str) -> bool {
        if address.len() < MIN_ADDRESS_LEN {
            return false;
        }
        self.network_address = address.to_string();
        true
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) {
        if self.name == name {
            return;
        }
        self.name = name.to_string();
        self.notify(DeviceField::Name, name.to_string());
    }

    /// Whether the name was supplied by a user. Custom names are never
    /// overwritten by names reported in device responses.
    pub fn name_is_custom(&self) -> bool {
        self.name_is_custom
    }

    pub fn set_name_is_custom(&mut self, custom: bool) {
        self.name_is_custom = custom;
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Disabled devices are excluded from refreshes and sends but remain in
    /// the collection ("hidden", not deleted).
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.notify(DeviceField::Enabled, enabled.to_string());
    }

    pub fn status(&self) -> DeviceStatus {
        self.status
    }

    fn set_status(&mut self, status: DeviceStatus) {
        self.status = status;
        self.notify(DeviceField::Status, status.display_name().to_string());
    }

    pub fn mode(&self) -> DeviceMode {
        self.mode
    }

    fn update_mode(&mut self, mode: DeviceMode) {
        self.mode = mode;
        self.notify(DeviceField::Mode, mode.as_i64().to_string());
    }

    /// Attach a change-notification channel.
    pub fn subscribe(&mut self, events: UnboundedSender<PropertyChanged>) {
        self.events = Some(events);
    }

    fn notify(&self, field: DeviceField, value: String) {
        if let Some(events) = &self.events {
            let _ = events.send(PropertyChanged {
                address: self.network_address.clone(),
                field,
                value,
            });
        }
    }

    /// Send a call to this device's HTTP API and fold the outcome into
    /// status/name/mode. Returns whether a valid payload came back.
    pub async fn send_command(&mut self, http: &DeviceHttp, path: &str, query: &str) -> bool {
        let base = compose_base_url(&self.network_address);
        let call = format!("{}{}", path, query);

        let body = match http.query(&base, &call).await {
            Ok(body) => body,
            Err(QueryError::Connection(reason)) => {
                debug!(address = %self.network_address, %reason, "device unreachable");
                self.set_status(DeviceStatus::Unreachable);
                return false;
            }
            Err(QueryError::NotADevice) => {
                debug!(address = %self.network_address, "host is not a Glimmr device");
                self.set_status(DeviceStatus::Error);
                return false;
            }
        };

        let Some(state) = parse_state_response(&body) else {
            debug!(address = %self.network_address, "malformed device response");
            self.set_status(DeviceStatus::Error);
            return false;
        };
        let Some(mode) = DeviceMode::from_i64(state.device_mode) else {
            debug!(
                address = %self.network_address,
                mode = state.device_mode,
                "device mode out of range"
            );
            self.set_status(DeviceStatus::Error);
            return false;
        };

        self.set_status(DeviceStatus::Default);
        if !self.name_is_custom {
            self.set_name(&state.device_name);
        }
        self.update_mode(mode);
        true
    }

    /// Fetch updated values. Disabled devices decline without touching the
    /// network.
    pub async fn refresh(&mut self, http: &DeviceHttp) -> bool {
        if !self.enabled {
            return false;
        }
        self.send_command(http, "", "").await
    }

    /// Switch operating mode. The local mode updates before the call
    /// completes; a failed call leaves it until the next refresh
    /// reconciles.
    pub async fn set_mode(&mut self, http: &DeviceHttp, mode: DeviceMode) -> bool {
        self.update_mode(mode);
        self.send_command(http, "/Mode", &format!("?mode={}", mode.as_i64()))
            .await
    }

    /// Alphabetic ordering by name, then by network address.
    pub fn ordering(&self, other: &Device) -> Ordering {
        self.name
            .cmp(&other.name)
            .then_with(|| self.network_address.cmp(&other.network_address))
    }

    /// Status text for list display, folding in the enabled flag.
    pub fn status_label(&self) -> &'static str {
        if !self.enabled {
            return "Hidden";
        }
        self.status.display_name()
    }

    /// Wrap into the shared handle used by registry and dispatcher.
    pub fn into_shared(self) -> SharedDevice {
        Arc::new(RwLock::new(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{refused_addr, spawn_http_stub, DEVICE_BODY};
    use std::sync::atomic::Ordering as AtomicOrdering;
    use tokio::sync::mpsc;

    fn http() -> DeviceHttp {
        DeviceHttp::new().unwrap()
    }

    #[test]
    fn test_defaults() {
        let device = Device::new();
        assert_eq!(device.network_address(), DEFAULT_ADDRESS);
        assert_eq!(device.name(), "");
        assert!(device.name_is_custom());
        assert!(device.enabled());
        assert_eq!(device.status(), DeviceStatus::Default);
        assert_eq!(device.mode(), DeviceMode::Off);
    }

    #[test]
    fn test_address_validation() {
        let mut device = Device::new();
        assert!(!device.set_network_address(""));
        assert!(!device.set_network_address("ab"));
        assert_eq!(device.network_address(), DEFAULT_ADDRESS);
        assert!(device.set_network_address("192.168.1.50"));
        assert_eq!(device.network_address(), "192.168.1.50");
    }

    #[test]
    fn test_base_url_scheme() {
        assert_eq!(compose_base_url("192.168.1.50"), "http://192.168.1.50");
        assert_eq!(compose_base_url("https://light.local"), "https://light.local");
    }

    #[test]
    fn test_mode_round_trip() {
        for value in 0..=5 {
            assert_eq!(DeviceMode::from_i64(value).unwrap().as_i64(), value);
        }
        assert!(DeviceMode::from_i64(-1).is_none());
        assert!(DeviceMode::from_i64(6).is_none());
    }

    #[tokio::test]
    async fn test_send_command_adopts_state() {
        let (addr, _) = spawn_http_stub("200 OK", DEVICE_BODY).await;
        let mut device = Device::new();
        device.set_network_address(&addr);
        device.set_name_is_custom(false);

        assert!(device.send_command(&http(), "", "").await);
        assert_eq!(device.status(), DeviceStatus::Default);
        assert_eq!(device.name(), "Living Room");
        assert_eq!(device.mode(), DeviceMode::Audio);
    }

    #[tokio::test]
    async fn test_custom_name_is_kept() {
        let (addr, _) = spawn_http_stub("200 OK", DEVICE_BODY).await;
        let mut device = Device::new();
        device.set_network_address(&addr);
        device.set_name("Desk Strip");

        assert!(device.send_command(&http(), "", "").await);
        assert_eq!(device.name(), "Desk Strip");
        assert_eq!(device.mode(), DeviceMode::Audio);
    }

    #[tokio::test]
    async fn test_not_a_device_sets_error() {
        let (addr, _) = spawn_http_stub("404 Not Found", "not here").await;
        let mut device = Device::new();
        device.set_network_address(&addr);

        assert!(!device.send_command(&http(), "", "").await);
        assert_eq!(device.status(), DeviceStatus::Error);
    }

    #[tokio::test]
    async fn test_connection_failure_sets_unreachable() {
        let addr = refused_addr().await;
        let mut device = Device::new();
        device.set_network_address(&addr);

        assert!(!device.send_command(&http(), "", "").await);
        assert_eq!(device.status(), DeviceStatus::Unreachable);
    }

    #[tokio::test]
    async fn test_malformed_response_sets_error() {
        let (addr, _) = spawn_http_stub("200 OK", "<html>It works!</html>").await;
        let mut device = Device::new();
        device.set_network_address(&addr);

        assert!(!device.send_command(&http(), "", "").await);
        assert_eq!(device.status(), DeviceStatus::Error);
    }

    #[tokio::test]
    async fn test_out_of_range_mode_sets_error() {
        let (addr, _) =
            spawn_http_stub("200 OK", r#"{"deviceName":"Strip","deviceMode":9}"#).await;
        let mut device = Device::new();
        device.set_network_address(&addr);

        assert!(!device.send_command(&http(), "", "").await);
        assert_eq!(device.status(), DeviceStatus::Error);
        assert_eq!(device.mode(), DeviceMode::Off);
    }

    #[tokio::test]
    async fn test_refresh_disabled_skips_network() {
        let (addr, hits) = spawn_http_stub("200 OK", DEVICE_BODY).await;
        let mut device = Device::new();
        device.set_network_address(&addr);
        device.set_enabled(false);

        assert!(!device.refresh(&http()).await);
        assert_eq!(hits.load(AtomicOrdering::SeqCst), 0);
        assert_eq!(device.status(), DeviceStatus::Default);
    }

    #[tokio::test]
    async fn test_set_mode_is_optimistic() {
        let addr = refused_addr().await;
        let mut device = Device::new();
        device.set_network_address(&addr);

        assert!(!device.set_mode(&http(), DeviceMode::Stream).await);
        assert_eq!(device.mode(), DeviceMode::Stream);
        assert_eq!(device.status(), DeviceStatus::Unreachable);
    }

    #[test]
    fn test_ordering_by_name_then_address() {
        let mut alpha = Device::new();
        alpha.set_network_address("10.0.0.1");
        alpha.set_name("Alpha");
        let mut beta = Device::new();
        beta.set_network_address("10.0.0.2");
        beta.set_name("Beta");

        assert_eq!(alpha.ordering(&beta), Ordering::Less);
        assert_eq!(beta.ordering(&alpha), Ordering::Greater);

        beta.set_name("Alpha");
        assert_eq!(alpha.ordering(&beta), Ordering::Less);
        assert_eq!(beta.ordering(&alpha), Ordering::Greater);
    }

    #[tokio::test]
    async fn test_property_changed_events() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut device = Device::new();
        device.set_network_address("192.168.1.50");
        device.subscribe(tx);

        device.set_name("Desk");
        let event = rx.recv().await.unwrap();
        assert_eq!(event.address, "192.168.1.50");
        assert_eq!(event.field, DeviceField::Name);
        assert_eq!(event.value, "Desk");

        device.set_enabled(false);
        let event = rx.recv().await.unwrap();
        assert_eq!(event.field, DeviceField::Enabled);
        assert_eq!(event.value, "false");
    }

    #[test]
    fn test_status_label_folds_in_enabled() {
        let mut device = Device::new();
        assert_eq!(device.status_label(), "OK");
        device.set_enabled(false);
        assert_eq!(device.status_label(), "Hidden");
    }

    #[test]
    fn test_persisted_fields_only() {
        let mut device = Device::new();
        device.set_network_address("192.168.1.50");
        device.set_name("Desk");

        let json = serde_json::to_string(&device).unwrap();
        assert!(json.contains("\"address\":\"192.168.1.50\""));
        assert!(json.contains("\"nameIsCustom\":true"));
        assert!(json.contains("\"enabled\":true"));
        assert!(!json.contains("status"));
        assert!(!json.contains("mode"));

        let restored: Device = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.network_address(), "192.168.1.50");
        assert_eq!(restored.name(), "Desk");
        assert_eq!(restored.status(), DeviceStatus::Default);
        assert_eq!(restored.mode(), DeviceMode::Off);
    }
}
