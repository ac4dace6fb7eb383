//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use glimmr_core::{Device, DeviceStatus};

use super::OutputFormatter;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    fn status_cell(device: &Device) -> Cell {
        if !device.enabled() {
            return Cell::new("Hidden").fg(Color::DarkGrey);
        }
        match device.status() {
            DeviceStatus::Default => Cell::new("OK").fg(Color::Green),
            DeviceStatus::Unreachable => Cell::new("Offline").fg(Color::Red),
            DeviceStatus::Error => Cell::new("Error").fg(Color::Yellow),
        }
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_devices(&self, devices: &[Device]) -> String {
        if devices.is_empty() {
            return "No devices found.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Address", "Name", "Mode", "Status"]);

        for device in devices {
            table.add_row(vec![
                Cell::new(device.network_address()),
                Cell::new(device.name()),
                Cell::new(device.mode().display_name()),
                Self::status_cell(device),
            ]);
        }

        format!("{}\n\nFound {} device(s)", table, devices.len())
    }

    fn format_device(&self, device: &Device) -> String {
        let status = if !device.enabled() {
            "Hidden".dimmed().to_string()
        } else {
            match device.status() {
                DeviceStatus::Default => "OK".green().to_string(),
                DeviceStatus::Unreachable => "Offline".red().to_string(),
                DeviceStatus::Error => "Error".yellow().to_string(),
            }
        };

        let lines = vec![
            format!("Device: {}", device.network_address()),
            format!("  Name:    {}", device.name()),
            format!("  Mode:    {}", device.mode().display_name()),
            format!("  Status:  {}", status),
        ];
        lines.join("\n")
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}
