//! Storage for the persisted device list.

pub mod devices;

pub use devices::DeviceStore;

/// Get the default data directory for Glimmr tools.
///
/// Uses the `directories` crate to find the appropriate platform-specific
/// data directory.
pub fn default_data_dir() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("", "glimmr", "glimmr-control")
        .map(|dirs| dirs.data_dir().to_path_buf())
}
