//! Mode command implementation.

use glimmr_core::{Device, DeviceHttp, DeviceStatus};

use crate::cli::ModeArgs;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the mode command
pub async fn run_mode(args: ModeArgs, json: bool) -> Result<(), CliError> {
    let mut device = Device::new();
    if !device.set_network_address(&args.address) {
        return Err(CliError::InvalidArgument(format!(
            "invalid device address '{}'",
            args.address
        )));
    }
    device.set_name_is_custom(false);

    let http = DeviceHttp::new()?;
    if !device.set_mode(&http, args.mode.to_mode()).await {
        return Err(match device.status() {
            DeviceStatus::Unreachable => CliError::Unreachable(args.address),
            _ => CliError::NotADevice(args.address),
        });
    }

    let formatter = get_formatter(json);
    println!("{}", formatter.format_device(&device));
    Ok(())
}
