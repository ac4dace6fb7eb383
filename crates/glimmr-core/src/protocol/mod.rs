//! Protocol layer for device communication.
//!
//! This module handles the HTTP API call and parsing of device responses.

pub mod http;
pub mod response;

pub use http::DeviceHttp;
pub use response::StateResponse;
