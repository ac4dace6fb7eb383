//! Status command implementation.

use glimmr_core::{Device, DeviceHttp};

use crate::cli::StatusArgs;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the status command
pub async fn run_status(args: StatusArgs, json: bool) -> Result<(), CliError> {
    let mut device = Device::new();
    if !device.set_network_address(&args.address) {
        return Err(CliError::InvalidArgument(format!(
            "invalid device address '{}'",
            args.address
        )));
    }
    device.set_name_is_custom(false);

    let http = DeviceHttp::new()?;
    device.refresh(&http).await;

    let formatter = get_formatter(json);
    println!("{}", formatter.format_device(&device));
    Ok(())
}
