//! Rate-limited command dispatch.
//!
//! Coalesces a rapid stream of outbound commands (a brightness slider, a
//! mode button mashed repeatedly) into at most one in-flight send per
//! window, always delivering the most recent pending command once the
//! window closes. Window state is keyed per device address, so rate
//! limiting is independent across devices.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::device::state::SharedDevice;
use crate::protocol::http::DeviceHttp;

/// Minimum spacing between sends to one device (4 per second).
pub const SEND_WINDOW: Duration = Duration::from_millis(250);

/// Delivery seam for dispatched commands.
#[async_trait]
pub trait CommandSink: Send + Sync + 'static {
    async fn deliver(&self, device: SharedDevice, path: String, query: String);
}

/// Production sink: locks the device and sends over the shared client.
pub struct HttpSink {
    http: DeviceHttp,
}

impl HttpSink {
    pub fn new(http: DeviceHttp) -> Self {
        Self { http }
    }
}

#[async_trait]
impl CommandSink for HttpSink {
    async fn deliver(&self, device: SharedDevice, path: String, query: String) {
        let mut device = device.write().await;
        device.send_command(&self.http, &path, &query).await;
    }
}

struct PendingCommand {
    device: SharedDevice,
    path: String,
    query: String,
}

type WindowMap = HashMap<String, Option<PendingCommand>>;

/// Coalescing dispatcher with one send window per device address.
#[derive(Clone)]
pub struct RateLimitedDispatcher {
    sink: Arc<dyn CommandSink>,
    windows: Arc<Mutex<WindowMap>>,
}

impl RateLimitedDispatcher {
    /// Dispatcher that delivers over the shared HTTP client.
    pub fn new(http: DeviceHttp) -> Self {
        Self::with_sink(Arc::new(HttpSink::new(http)))
    }

    /// Dispatcher with a custom delivery sink.
    pub fn with_sink(sink: Arc<dyn CommandSink>) -> Self {
        Self {
            sink,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Submit a command for a device.
    ///
    /// With no window open for the device, the command goes out immediately
    /// and a window opens. Otherwise it replaces the device's pending
    /// command (the timer is not reset) and goes out when the window
    /// expires.
    pub async fn submit(&self, device: SharedDevice, path: &str, query: &str) {
        let address = device.read().await.network_address().to_string();

        let opened = {
            let mut windows = self.windows.lock().await;
            match windows.entry(address.clone()) {
                Entry::Occupied(mut open) => {
                    open.insert(Some(PendingCommand {
                        device: device.clone(),
                        path: path.to_string(),
                        query: query.to_string(),
                    }));
                    false
                }
                Entry::Vacant(slot) => {
                    slot.insert(None);
                    true
                }
            }
        };

        if !opened {
            return;
        }

        self.spawn_delivery(device, path.to_string(), query.to_string());
        tokio::spawn(run_window(
            address,
            Arc::clone(&self.windows),
            Arc::clone(&self.sink),
        ));
    }

    fn spawn_delivery(&self, device: SharedDevice, path: String, query: String) {
        let sink = Arc::clone(&self.sink);
        tokio::spawn(async move {
            sink.deliver(device, path, query).await;
        });
    }
}

/// Window timer for one device: keeps firing while commands coalesce,
/// closes once a window expires with nothing pending.
async fn run_window(address: String, windows: Arc<Mutex<WindowMap>>, sink: Arc<dyn CommandSink>) {
    loop {
        tokio::time::sleep(SEND_WINDOW).await;

        let pending = {
            let mut windows = windows.lock().await;
            match windows.get_mut(&address) {
                Some(slot) => match slot.take() {
                    Some(command) => Some(command),
                    None => {
                        windows.remove(&address);
                        None
                    }
                },
                None => None,
            }
        };

        match pending {
            Some(command) => {
                debug!(%address, "delivering coalesced command");
                let sink = Arc::clone(&sink);
                tokio::spawn(async move {
                    sink.deliver(command.device, command.path, command.query)
                        .await;
                });
            }
            None => break,
        }
    }
}
