//! Refresh command implementation.

use std::path::PathBuf;

use glimmr_core::DeviceHttp;

use crate::commands::devices::{load_registry, open_store};
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the refresh command
pub async fn run_refresh(data_dir: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let store = open_store(data_dir)?;
    let mut registry = load_registry(&store).await?;

    if registry.is_empty() {
        return Err(CliError::NoDevicesFound);
    }

    let http = DeviceHttp::new()?;
    registry.refresh_all(&http).await;
    // Responses may have adopted new device names.
    registry.sort().await;

    let devices = registry.snapshot().await;
    let formatter = get_formatter(json);
    println!("{}", formatter.format_devices(&devices));

    store.save(&devices).await?;
    Ok(())
}
