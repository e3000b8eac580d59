//! Settings persistence
//!
//! Loads the settings record from flash at boot and writes it back when
//! the operator leaves the settings menu. Anything that fails validation
//! (empty flash, torn write, old layout) falls back to defaults.

use defmt::*;

use amblyon_core::config::{Settings, SettingsRecord};
use amblyon_hal_rp2040::flash::{FlashError, FlashStorage};
use amblyon_hal_rp2040::{FlashStorageTrait, StorageKey};

/// Maximum serialized record size
const MAX_RECORD_SIZE: usize = 64;

/// Settings persistence errors
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Flash operation failed
    Flash(FlashError),
    /// Deserialization failed
    Deserialize,
    /// Serialization failed
    Serialize,
    /// Magic or version mismatch
    InvalidRecord,
    /// CRC mismatch
    CrcMismatch,
}

impl From<FlashError> for SettingsError {
    fn from(e: FlashError) -> Self {
        SettingsError::Flash(e)
    }
}

/// Settings store over the flash driver
pub struct SettingsStore<'d> {
    storage: FlashStorage<'d>,
}

impl<'d> SettingsStore<'d> {
    pub fn new(storage: FlashStorage<'d>) -> Self {
        Self { storage }
    }

    /// Load and validate the settings record
    pub async fn load(&mut self) -> Result<Settings, SettingsError> {
        let mut buf = [0u8; MAX_RECORD_SIZE];
        let len = self.storage.read(StorageKey::Settings, &mut buf).await?;

        let record: SettingsRecord =
            postcard::from_bytes(&buf[..len]).map_err(|_| SettingsError::Deserialize)?;

        if !record.is_valid() {
            return Err(SettingsError::InvalidRecord);
        }
        if !record.verify_crc() {
            return Err(SettingsError::CrcMismatch);
        }
        Ok(record.settings)
    }

    /// Load settings, falling back to defaults when flash has no valid record
    pub async fn load_or_default(&mut self) -> Settings {
        match self.load().await {
            Ok(settings) => {
                info!("Loaded settings from flash");
                settings
            }
            Err(SettingsError::Flash(FlashError::NotFound)) => {
                info!("No settings in flash, using defaults");
                Settings::default()
            }
            Err(e) => {
                warn!("Invalid settings record ({:?}), using defaults", e);
                Settings::default()
            }
        }
    }

    /// Serialize and write a settings record
    pub async fn save(&mut self, settings: Settings) -> Result<(), SettingsError> {
        let record = SettingsRecord::from_settings(settings);
        let mut buf = [0u8; MAX_RECORD_SIZE];
        let data =
            postcard::to_slice(&record, &mut buf).map_err(|_| SettingsError::Serialize)?;
        self.storage.write(StorageKey::Settings, data).await?;
        Ok(())
    }
}
