//! Device state and outbound command scheduling.

pub mod dispatch;
pub mod state;

pub use dispatch::{CommandSink, RateLimitedDispatcher};
pub use state::{Device, DeviceMode, DeviceStatus, SharedDevice};
