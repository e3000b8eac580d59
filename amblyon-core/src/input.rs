//! Input dispatch
//!
//! Maps raw key and button presses to device commands and suppresses
//! mechanical bounce with a per-source deadline check instead of a
//! blocking delay.

use crate::config::AdjustDir;
use crate::state::EyeSide;

/// Debounce lockout after an accepted press
pub const DEBOUNCE_MS: u32 = 150;

/// Symbolic code produced by the matrix keypad
///
/// One code per physical key, named after the legend the scanner
/// reports, not the key position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    N,
}

/// Front-panel push buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Button {
    /// Start/stop the blink session
    Blink,
    /// Start/stop the waiting session
    Wait,
}

/// A command decoded from the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    /// Enter or leave the settings menu
    ToggleMenu,
    /// Move the menu cursor down
    NextField,
    /// Move the menu cursor up
    PrevField,
    /// Step the selected field up
    AdjustUp,
    /// Step the selected field down
    AdjustDown,
    /// Select joint lamp phasing
    SetJointMode,
    /// Select separate lamp phasing
    SetSeparateMode,
    /// Switch between manual and automatic training
    ToggleTraining,
    /// Silence or restore audio cues
    ToggleMute,
    /// Fire one projector pulse by hand
    Pulse(EyeSide),
}

impl Key {
    /// Command bound to this key, if any
    pub fn command(self) -> Option<Command> {
        match self {
            Key::C => Some(Command::ToggleMenu),
            Key::E => Some(Command::NextField),
            Key::D => Some(Command::PrevField),
            Key::B => Some(Command::AdjustUp),
            Key::A => Some(Command::AdjustDown),
            Key::J => Some(Command::SetJointMode),
            Key::I => Some(Command::SetSeparateMode),
            Key::K => Some(Command::ToggleTraining),
            Key::G => Some(Command::ToggleMute),
            Key::F => Some(Command::Pulse(EyeSide::Left)),
            Key::H => Some(Command::Pulse(EyeSide::Right)),
            // Spare key, no binding
            Key::N => None,
        }
    }
}

impl Command {
    /// The adjustment direction for step commands
    pub fn adjust_dir(self) -> Option<AdjustDir> {
        match self {
            Command::AdjustUp => Some(AdjustDir::Up),
            Command::AdjustDown => Some(AdjustDir::Down),
            _ => None,
        }
    }
}

/// Per-source press debouncer
///
/// The first press is accepted immediately; anything within the lockout
/// window afterwards is dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct Debouncer {
    last_accept_ms: Option<u32>,
}

impl Debouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept or reject a press at `now_ms`
    pub fn accept(&mut self, now_ms: u32) -> bool {
        if let Some(last) = self.last_accept_ms {
            if now_ms.wrapping_sub(last) < DEBOUNCE_MS {
                return false;
            }
        }
        self.last_accept_ms = Some(now_ms);
        true
    }
}
