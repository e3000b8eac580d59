//! Audio cue playback

pub mod dfplayer;

pub use dfplayer::{DfPlayer, DfPlayerError};
