//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod audio;
pub mod backlight;
pub mod buttons;
pub mod controller;
pub mod display;
pub mod keypad;
pub mod lamps;
pub mod projector;
pub mod storage;
pub mod tick;

pub use audio::audio_task;
pub use backlight::backlight_task;
pub use buttons::buttons_task;
pub use controller::controller_task;
pub use display::display_task;
pub use keypad::keypad_task;
pub use lamps::lamps_task;
pub use projector::projector_task;
pub use storage::storage_task;
pub use tick::tick_task;
