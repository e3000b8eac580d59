//! RP2040-specific HAL for the Amblyon firmware
//!
//! Provides the RP2040 implementation of the shared `amblyon-hal` traits:
//!
//! - Flash storage driver (implements `amblyon_hal::FlashStorage`)
//! - GPIO wrappers (implement `amblyon_hal::{InputPin, OutputPin}`)

#![no_std]

pub mod flash;
pub mod gpio;

// Re-export shared traits from amblyon-hal for convenience
pub use amblyon_hal::{FlashStorage as FlashStorageTrait, StorageKey};
