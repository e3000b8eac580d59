//! Settings types and persistence framing

pub mod fields;
pub mod settings;

pub use fields::{AdjustDir, Field, FIELD_COUNT};
pub use settings::{
    BlinkMode, Settings, SettingsRecord, TrainingMode, SETTINGS_MAGIC, SETTINGS_VERSION,
};
