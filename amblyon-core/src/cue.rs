//! Audio cue track mapping
//!
//! The cue player is a DFPlayer-style module with numbered tracks on its
//! storage card. Track numbers match the card layout of the reference
//! device and are not contiguous.

/// An audio cue the device can play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cue {
    /// "Cover your left eye" prompt
    LeftEye,
    /// "Cover your right eye" prompt
    RightEye,
    /// "Both eyes open" prompt
    BothEyes,
    /// One repetition finished, more to go
    Progress,
    /// Session finished
    Complete,
}

impl Cue {
    /// Track index on the audio module's card
    pub fn track(self) -> u8 {
        match self {
            Cue::LeftEye => 1,
            Cue::RightEye => 3,
            Cue::BothEyes => 5,
            Cue::Progress => 7,
            Cue::Complete => 9,
        }
    }
}
