//! JSON-formatted output for CLI.

use serde_json::{json, Value};

use glimmr_core::Device;

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn device_value(device: &Device) -> Value {
        json!({
            "address": device.network_address(),
            "name": device.name(),
            "nameIsCustom": device.name_is_custom(),
            "enabled": device.enabled(),
            "mode": device.mode().as_i64(),
            "status": device.status_label(),
        })
    }

    fn to_json(value: &Value) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_devices(&self, devices: &[Device]) -> String {
        let items: Vec<Value> = devices.iter().map(Self::device_value).collect();
        Self::to_json(&json!({
            "devices": items,
            "count": devices.len()
        }))
    }

    fn format_device(&self, device: &Device) -> String {
        Self::to_json(&Self::device_value(device))
    }

    fn format_message(&self, message: &str) -> String {
        Self::to_json(&json!({ "message": message }))
    }
}
