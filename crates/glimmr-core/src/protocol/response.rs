//! Parsing of the device state payload.

use serde::Deserialize;

/// Structured payload returned by every status/command query.
///
/// Devices may include more fields; anything missing a name and mode is
/// treated as not coming from a Glimmr device.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateResponse {
    pub device_name: String,
    pub device_mode: i64,
}

/// Parse a response body into a state payload. Malformed bodies yield
/// `None`; the caller records the failure on the device's status field.
pub fn parse_state_response(body: &str) -> Option<StateResponse> {
    serde_json::from_str(body).ok()
}
