//! Device settings and the persisted record
//!
//! Settings are stored in flash as a postcard-serialized record framed with
//! a magic number, version and CRC32, so uninitialized or corrupted flash
//! never silently becomes live configuration. Fractional-second fields use
//! decisecond fixed point; there are no floats anywhere in the core.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Magic number identifying a valid settings record ("ABLY")
pub const SETTINGS_MAGIC: u32 = 0x41424C59;

/// Current settings record version
pub const SETTINGS_VERSION: u8 = 1;

/// How the two lamp channels blink relative to each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum BlinkMode {
    /// Both channels toggle together
    #[default]
    Joint,
    /// Channels toggle with complementary phase
    Separate,
}

impl BlinkMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            BlinkMode::Joint => BlinkMode::Separate,
            BlinkMode::Separate => BlinkMode::Joint,
        }
    }
}

/// How a training run is started
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrainingMode {
    /// Operator triggers single actions
    #[default]
    Manual,
    /// Staged guided sequence before the blink session
    Automatic,
}

impl TrainingMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            TrainingMode::Manual => TrainingMode::Automatic,
            TrainingMode::Automatic => TrainingMode::Manual,
        }
    }
}

/// Device settings
///
/// Mutated only through the settings menu and the mode-toggle keys;
/// persisted only when the operator leaves the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Settings {
    /// Lamp toggle interval in 0.1s units (0 = hold lamps on continuously)
    pub interval_ds: u16,
    /// Lamp brightness in percent, 0..=100
    pub brightness: u8,
    /// Number of session repetitions
    pub quantity: u16,
    /// Session duration in seconds
    pub time_s: u16,
    /// Projector pulse duration in 0.1s units
    pub length_ds: u16,
    /// Blink mode for sessions
    pub blink_mode: BlinkMode,
    /// Manual or automatic training
    pub training_mode: TrainingMode,
    /// Suppress audio cues
    pub mute: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            interval_ds: 2,
            brightness: 100,
            quantity: 2,
            time_s: 10,
            length_ds: 2,
            blink_mode: BlinkMode::Joint,
            training_mode: TrainingMode::Manual,
            mute: false,
        }
    }
}

impl Settings {
    /// Lamp toggle interval in milliseconds
    pub fn interval_ms(&self) -> u32 {
        self.interval_ds as u32 * 100
    }

    /// Projector pulse duration in milliseconds
    pub fn length_ms(&self) -> u32 {
        self.length_ds as u32 * 100
    }

    /// Session duration in milliseconds
    pub fn time_ms(&self) -> u32 {
        self.time_s as u32 * 1000
    }
}

/// Settings record as stored in flash
///
/// The CRC covers magic, version and every settings field, so a record
/// from an older layout or a torn write fails validation and the loader
/// falls back to defaults.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SettingsRecord {
    /// Magic number for validation
    pub magic: u32,
    /// Record format version
    pub version: u8,
    /// The settings payload
    pub settings: Settings,
    /// CRC32 checksum over magic, version and settings
    pub crc: u32,
}

impl SettingsRecord {
    /// Build a record from settings with a valid CRC
    pub fn from_settings(settings: Settings) -> Self {
        let mut record = Self {
            magic: SETTINGS_MAGIC,
            version: SETTINGS_VERSION,
            settings,
            crc: 0,
        };
        record.crc = record.calculate_crc();
        record
    }

    /// Check magic and version
    pub fn is_valid(&self) -> bool {
        self.magic == SETTINGS_MAGIC && self.version == SETTINGS_VERSION
    }

    /// Calculate CRC32 over everything except the crc field itself
    pub fn calculate_crc(&self) -> u32 {
        let mut crc: u32 = 0xFFFFFFFF;

        crc = crc32_update(crc, &self.magic.to_le_bytes());
        crc = crc32_update(crc, &[self.version]);

        let s = &self.settings;
        crc = crc32_update(crc, &s.interval_ds.to_le_bytes());
        crc = crc32_update(crc, &[s.brightness]);
        crc = crc32_update(crc, &s.quantity.to_le_bytes());
        crc = crc32_update(crc, &s.time_s.to_le_bytes());
        crc = crc32_update(crc, &s.length_ds.to_le_bytes());
        crc = crc32_update(crc, &[s.blink_mode as u8]);
        crc = crc32_update(crc, &[s.training_mode as u8]);
        crc = crc32_update(crc, &[s.mute as u8]);

        !crc
    }

    /// Verify the stored CRC
    pub fn verify_crc(&self) -> bool {
        self.crc == self.calculate_crc()
    }
}

/// Simple CRC32 update function (IEEE 802.3 polynomial)
fn crc32_update(crc: u32, data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB88320;
    let mut crc = crc;

    for &byte in data {
        crc ^= byte as u32;
        for _ in 0..8 {
            if crc & 1 != 0 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }

    crc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference() {
        let s = Settings::default();
        assert_eq!(s.interval_ds, 2);
        assert_eq!(s.brightness, 100);
        assert_eq!(s.quantity, 2);
        assert_eq!(s.time_s, 10);
        assert_eq!(s.length_ds, 2);
        assert_eq!(s.blink_mode, BlinkMode::Joint);
        assert_eq!(s.training_mode, TrainingMode::Manual);
        assert!(!s.mute);
    }

    #[test]
    fn test_unit_conversions() {
        let s = Settings::default();
        assert_eq!(s.interval_ms(), 200);
        assert_eq!(s.length_ms(), 200);
        assert_eq!(s.time_ms(), 10_000);
    }

    #[test]
    fn test_record_round_trip_is_valid() {
        let record = SettingsRecord::from_settings(Settings::default());
        assert!(record.is_valid());
        assert!(record.verify_crc());
    }

    #[test]
    fn test_crc_detects_mutation() {
        let mut record = SettingsRecord::from_settings(Settings::default());
        record.settings.brightness = 42;
        assert!(!record.verify_crc());
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let mut record = SettingsRecord::from_settings(Settings::default());
        record.magic = 0xDEADBEEF;
        assert!(!record.is_valid());
    }

    #[test]
    fn test_version_mismatch_is_rejected() {
        let mut record = SettingsRecord::from_settings(Settings::default());
        record.version = SETTINGS_VERSION + 1;
        assert!(!record.is_valid());
    }

    #[test]
    fn test_mode_toggles() {
        assert_eq!(BlinkMode::Joint.toggled(), BlinkMode::Separate);
        assert_eq!(BlinkMode::Separate.toggled(), BlinkMode::Joint);
        assert_eq!(TrainingMode::Manual.toggled(), TrainingMode::Automatic);
        assert_eq!(TrainingMode::Automatic.toggled(), TrainingMode::Manual);
    }
}
