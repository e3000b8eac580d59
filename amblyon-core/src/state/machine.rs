//! Session mode definition
//!
//! All lamp and backlight behavior is a function of the current mode and
//! the settings. The three run modes are mutually exclusive by
//! construction; the reference firmware tracked them as independent
//! boolean flags, which allowed impossible combinations.

use crate::config::BlinkMode;

/// Left or right optical channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EyeSide {
    Left,
    Right,
}

/// Session run mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// No session in progress
    #[default]
    Idle,
    /// Timed blink session with the given lamp phasing
    Blinking(BlinkMode),
    /// Timed waiting session, lamps off
    Waiting,
}

impl Mode {
    /// Check if a session (blinking or waiting) is in progress
    pub fn is_active(&self) -> bool {
        !matches!(self, Mode::Idle)
    }

    /// Check if the lamps may be driven in this mode
    pub fn lamps_allowed(&self) -> bool {
        matches!(self, Mode::Blinking(_))
    }
}
