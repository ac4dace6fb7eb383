//! Discover command implementation.

use std::time::Duration;

use glimmr_core::{Device, DeviceHttp, DiscoveryService};

use crate::cli::DiscoverArgs;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the discover command
pub async fn run_discover(args: DiscoverArgs, json: bool) -> Result<(), CliError> {
    let http = DeviceHttp::new()?;
    let mut discovery = DiscoveryService::new(http)?;
    let mut found = discovery.start()?;

    if args.watch {
        println!("Watching for devices (press Ctrl+C to stop)...\n");
        let formatter = get_formatter(json);
        loop {
            tokio::select! {
                event = found.recv() => {
                    match event {
                        Some(event) => println!("{}\n", formatter.format_device(&event.device)),
                        None => break,
                    }
                }
                _ = tokio::signal::ctrl_c() => break,
            }
        }
        discovery.stop();
        return Ok(());
    }

    println!("Discovering devices for {} seconds...", args.duration);

    let mut devices: Vec<Device> = Vec::new();
    let deadline = tokio::time::sleep(Duration::from_secs(args.duration));
    tokio::pin!(deadline);
    loop {
        tokio::select! {
            event = found.recv() => {
                match event {
                    Some(event) => {
                        // Re-announcements may surface a device twice.
                        let address = event.device.network_address().to_string();
                        if !devices.iter().any(|d| d.network_address() == address) {
                            devices.push(event.device);
                        }
                    }
                    None => break,
                }
            }
            _ = &mut deadline => break,
        }
    }
    discovery.stop();

    devices.sort_by(|a, b| a.ordering(b));

    let formatter = get_formatter(json);
    println!("{}", formatter.format_devices(&devices));

    if devices.is_empty() {
        return Err(CliError::NoDevicesFound);
    }

    Ok(())
}
