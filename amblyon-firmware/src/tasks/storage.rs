//! Settings storage task
//!
//! Owns the flash driver and writes settings records on request. Keeping
//! all flash access in one task serializes writes against the XIP flash.

use defmt::*;

use crate::channels::SETTINGS_SAVE;
use crate::config::SettingsStore;

/// Storage task - persists settings when the controller requests it
#[embassy_executor::task]
pub async fn storage_task(mut store: SettingsStore<'static>) {
    info!("Storage task started");

    loop {
        let settings = SETTINGS_SAVE.wait().await;
        match store.save(settings).await {
            Ok(()) => info!("Settings saved to flash"),
            Err(e) => warn!("Failed to save settings: {:?}", e),
        }
    }
}
