//! Amblyon Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The keypad driver in `amblyon-drivers` is generic
//! over the GPIO traits so it can be exercised on the host with mock pins,
//! and the settings store is generic over [`flash::FlashStorage`].

#![no_std]
#![deny(unsafe_code)]

pub mod flash;
pub mod gpio;

// Re-export key traits at crate root for convenience
pub use flash::{FlashStorage, StorageKey};
pub use gpio::{InputPin, OutputPin};
