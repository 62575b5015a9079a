//! Configuration persistence
//!
//! Reads and writes the workspace TOML and the WiFi credentials in the
//! flash config partition.

use core::str;
use defmt::*;

use picodash_core::config::{parse_config, parse_credentials, DeviceConfig, LineError, WifiCredentials};
use picodash_hal_rp2040::flash::{FlashError, Rp2040FlashStorage, StorageKey, MAX_ITEM_SIZE};
// Import the FlashStorage trait to bring methods into scope
use picodash_hal_rp2040::FlashStorageTrait;

/// Maximum credentials file size
const MAX_CREDENTIALS_SIZE: usize = 128;

/// Configuration persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LoadError {
    /// Flash operation failed
    Flash(FlashError),
    /// Invalid UTF-8 in stored text
    InvalidUtf8,
    /// TOML parsing failed
    Parse(LineError),
}

impl From<FlashError> for LoadError {
    fn from(e: FlashError) -> Self {
        LoadError::Flash(e)
    }
}

impl From<LineError> for LoadError {
    fn from(e: LineError) -> Self {
        LoadError::Parse(e)
    }
}

/// Configuration persistence manager
pub struct ConfigPersistence<'d> {
    storage: Rp2040FlashStorage<'d>,
}

impl<'d> ConfigPersistence<'d> {
    /// Create a new config persistence manager
    pub fn new(storage: Rp2040FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Load and parse the workspace configuration from flash
    pub async fn load(&mut self) -> Result<DeviceConfig, LoadError> {
        let mut buffer = [0u8; MAX_ITEM_SIZE];
        let len = self
            .storage
            .read(StorageKey::WorkspacesToml, &mut buffer)
            .await?;

        debug!("Read {} bytes of TOML from flash", len);

        let text = str::from_utf8(&buffer[..len]).map_err(|_| LoadError::InvalidUtf8)?;
        let config = parse_config(text)?;

        log_config_summary(&config);
        Ok(config)
    }

    /// Store workspace configuration text, replacing what is there
    pub async fn store(&mut self, text: &str) -> Result<(), LoadError> {
        self.storage
            .write(StorageKey::WorkspacesToml, text.as_bytes())
            .await?;
        info!("Stored {} bytes of configuration", text.len());
        Ok(())
    }

    /// Load WiFi credentials stored apart from the TOML
    ///
    /// Returns `Ok(None)` when no credentials are stored or the stored
    /// lines are incomplete.
    pub async fn load_credentials(&mut self) -> Result<Option<WifiCredentials>, LoadError> {
        let mut buffer = [0u8; MAX_CREDENTIALS_SIZE];
        let len = match self
            .storage
            .read(StorageKey::WifiCredentials, &mut buffer)
            .await
        {
            Ok(len) => len,
            Err(FlashError::NotFound) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let text = str::from_utf8(&buffer[..len]).map_err(|_| LoadError::InvalidUtf8)?;
        Ok(parse_credentials(text))
    }

    /// Wipe everything stored in the config partition
    pub async fn erase(&mut self) -> Result<(), LoadError> {
        self.storage.erase_all().await?;
        Ok(())
    }
}

/// Log a summary of the loaded configuration
pub fn log_config_summary(config: &DeviceConfig) {
    debug!("  {} workspaces", config.workspaces.len());
    debug!(
        "  tick {} ms, brightness {}%, auto-cycle {}",
        config.display.tick_ms, config.display.brightness, config.display.auto_cycle
    );
    debug!("  wifi section: {}", config.wifi.is_some());
}
