//! Inter-task communication channels
//!
//! Defines the static channels used for communication between Embassy tasks.
//! Uses embassy-sync primitives for safe async communication.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;

use amblyon_core::config::Settings;
use amblyon_core::cue::Cue;
use amblyon_core::input::{Button, Key};
use amblyon_core::session::LampCommand;
use amblyon_core::training::{BacklightCommand, ProjectorCommand};

/// Channel capacity for keypad presses
const KEY_CHANNEL_SIZE: usize = 8;

/// Channel capacity for button presses
const BUTTON_CHANNEL_SIZE: usize = 4;

/// Channel capacity for queued audio cues
const CUE_CHANNEL_SIZE: usize = 4;

/// Debounced keypad presses from the matrix scanner
pub static KEY_CHANNEL: Channel<CriticalSectionRawMutex, Key, KEY_CHANNEL_SIZE> = Channel::new();

/// Debounced front-panel button presses
pub static BUTTON_CHANNEL: Channel<CriticalSectionRawMutex, Button, BUTTON_CHANNEL_SIZE> =
    Channel::new();

/// Audio cues queued for the player task
pub static CUE_CHANNEL: Channel<CriticalSectionRawMutex, Cue, CUE_CHANNEL_SIZE> = Channel::new();

/// Lamp PWM command (updated by controller)
pub static LAMP_CMD: Signal<CriticalSectionRawMutex, LampCommand> = Signal::new();

/// Projector trigger command (updated by controller)
pub static PROJECTOR_CMD: Signal<CriticalSectionRawMutex, ProjectorCommand> = Signal::new();

/// Backlight command (updated by controller)
pub static BACKLIGHT_CMD: Signal<CriticalSectionRawMutex, BacklightCommand> = Signal::new();

/// Request to persist the given settings to flash
pub static SETTINGS_SAVE: Signal<CriticalSectionRawMutex, Settings> = Signal::new();

/// Signal that a screen update is ready to be sent
pub static SCREEN_UPDATE: Signal<CriticalSectionRawMutex, ()> = Signal::new();
