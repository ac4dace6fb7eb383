//! Saved device list management.

use std::path::PathBuf;

use glimmr_core::{AddOutcome, Device, DeviceHttp, DeviceRegistry, DeviceStore};

use crate::cli::{DeviceAddArgs, DevicesArgs, DevicesCommands};
use crate::error::CliError;
use crate::output::{get_formatter, OutputFormatter};

/// Resolve the store from `--data-dir` or the platform default.
pub fn open_store(data_dir: Option<PathBuf>) -> Result<DeviceStore, CliError> {
    let dir = data_dir
        .or_else(glimmr_core::storage::default_data_dir)
        .ok_or_else(|| {
            CliError::InvalidArgument("no data directory available; pass --data-dir".to_string())
        })?;
    Ok(DeviceStore::new(dir)?)
}

/// Load the saved device list into a registry.
pub async fn load_registry(store: &DeviceStore) -> Result<DeviceRegistry, CliError> {
    let mut registry = DeviceRegistry::new();
    registry.load_records(store.load().await?).await;
    Ok(registry)
}

/// Run the devices command
pub async fn run_devices(
    args: DevicesArgs,
    data_dir: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let store = open_store(data_dir)?;
    let mut registry = load_registry(&store).await?;
    let formatter = get_formatter(json);

    match args.command {
        DevicesCommands::List => {
            println!("{}", formatter.format_devices(&registry.snapshot().await));
            return Ok(());
        }
        DevicesCommands::Add(add) => run_add(add, &mut registry, formatter.as_ref()).await?,
        DevicesCommands::Remove(target) => {
            if !registry.remove(&target.address).await {
                return Err(CliError::UnknownDevice(target.address));
            }
            println!("{}", formatter.format_message("Device removed"));
        }
        DevicesCommands::Rename(rename) => {
            if !registry.rename(&rename.address, &rename.name).await {
                return Err(CliError::UnknownDevice(rename.address));
            }
            println!("{}", formatter.format_message("Device renamed"));
        }
        DevicesCommands::Enable(target) => {
            set_enabled(&registry, &target.address, true, formatter.as_ref()).await?
        }
        DevicesCommands::Disable(target) => {
            set_enabled(&registry, &target.address, false, formatter.as_ref()).await?
        }
    }

    store.save(&registry.snapshot().await).await?;
    Ok(())
}

async fn run_add(
    args: DeviceAddArgs,
    registry: &mut DeviceRegistry,
    formatter: &dyn OutputFormatter,
) -> Result<(), CliError> {
    let mut candidate = Device::new();
    if !candidate.set_network_address(&args.address) {
        return Err(CliError::InvalidArgument(format!(
            "invalid device address '{}'",
            args.address
        )));
    }
    match &args.name {
        Some(name) => candidate.set_name(name),
        None => candidate.set_name_is_custom(false),
    }

    let outcome = registry.add(candidate).await;

    if outcome == AddOutcome::Added && !args.no_refresh {
        if let Some(device) = registry.find(&args.address).await {
            let http = DeviceHttp::new()?;
            device.write().await.refresh(&http).await;
        }
    }

    let message = match outcome {
        AddOutcome::Added => "Device added",
        AddOutcome::MergedName => "Device already known; name updated",
        AddOutcome::AlreadyKnown => "Device already known",
    };
    println!("{}", formatter.format_message(message));
    Ok(())
}

async fn set_enabled(
    registry: &DeviceRegistry,
    address: &str,
    enabled: bool,
    formatter: &dyn OutputFormatter,
) -> Result<(), CliError> {
    let Some(device) = registry.find(address).await else {
        return Err(CliError::UnknownDevice(address.to_string()));
    };
    device.write().await.set_enabled(enabled);
    let message = if enabled {
        "Device enabled"
    } else {
        "Device disabled"
    };
    println!("{}", formatter.format_message(message));
    Ok(())
}
