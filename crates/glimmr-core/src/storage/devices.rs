//! Device list persistence.
//!
//! Stores the user-visible device collection as a JSON file. Only the
//! fields needed to reconstruct devices are written; status and mode are
//! runtime state and start fresh on load.

use std::path::PathBuf;

use tokio::fs;

use crate::device::state::Device;
use crate::error::StorageError;

const STORE_FILE: &str = "devices.json";

/// File-backed store for the device list.
///
/// Takes a directory in the constructor so each consumer (CLI, future
/// GUIs) can provide the correct storage path.
pub struct DeviceStore {
    path: PathBuf,
}

impl DeviceStore {
    /// Create a store under the given directory.
    pub fn new(dir: PathBuf) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&dir).map_err(StorageError::Io)?;
        Ok(Self {
            path: dir.join(STORE_FILE),
        })
    }

    /// Load the persisted list; a missing file is an empty list.
    pub async fn load(&self) -> Result<Vec<Device>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(StorageError::Io)?;
        serde_json::from_str(&content).map_err(StorageError::Serialization)
    }

    /// Write the device list.
    pub async fn save(&self, devices: &[Device]) -> Result<(), StorageError> {
        let content =
            serde_json::to_string_pretty(devices).map_err(StorageError::Serialization)?;
        fs::write(&self.path, content).await.map_err(StorageError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::state::{DeviceMode, DeviceStatus};

    fn create_test_store() -> (DeviceStore, tempfile::TempDir) {
        let temp_dir = tempfile::tempdir().unwrap();
        let store = DeviceStore::new(temp_dir.path().to_path_buf()).unwrap();
        (store, temp_dir)
    }

    #[tokio::test]
    async fn test_save_and_load_round_trip() {
        let (store, _tmp) = create_test_store();

        let mut desk = Device::new();
        desk.set_network_address("192.168.1.50");
        desk.set_name("Desk");
        let mut hidden = Device::new();
        hidden.set_network_address("192.168.1.51");
        hidden.set_name("glimmr-abc");
        hidden.set_name_is_custom(false);
        hidden.set_enabled(false);

        store.save(&[desk, hidden]).await.unwrap();

        let loaded = store.load().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].network_address(), "192.168.1.50");
        assert_eq!(loaded[0].name(), "Desk");
        assert!(loaded[0].name_is_custom());
        assert!(!loaded[1].name_is_custom());
        assert!(!loaded[1].enabled());

        // Runtime state starts fresh.
        assert_eq!(loaded[0].status(), DeviceStatus::Default);
        assert_eq!(loaded[0].mode(), DeviceMode::Off);
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let (store, _tmp) = create_test_store();
        let loaded = store.load().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let (store, tmp) = create_test_store();
        std::fs::write(tmp.path().join(STORE_FILE), "not json").unwrap();

        let result = store.load().await;
        assert!(matches!(result, Err(StorageError::Serialization(_))));
    }
}
