//! Events produced by the session controller and training orchestrator

use super::machine::EyeSide;
use crate::cue::Cue;

/// Events emitted by `tick` calls on the core state machines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Session controller events
    /// One blink window elapsed; more repetitions remain
    CycleFinished { completed: u16 },
    /// The final blink window elapsed; session is done
    SessionFinished { completed: u16 },
    /// The waiting session elapsed
    WaitFinished,

    // Training orchestrator events
    /// A prompt stage began; play its cue
    PromptStarted(Cue),
    /// A projector pulse began
    PulseStarted(EyeSide),
    /// The staged sequence finished; start the blink session
    BlinkHandoff,
}

impl Event {
    /// Check if this event comes from the session controller
    pub fn is_session_event(&self) -> bool {
        matches!(
            self,
            Event::CycleFinished { .. } | Event::SessionFinished { .. } | Event::WaitFinished
        )
    }

    /// Check if this event comes from the training orchestrator
    pub fn is_trainer_event(&self) -> bool {
        matches!(
            self,
            Event::PromptStarted(_) | Event::PulseStarted(_) | Event::BlinkHandoff
        )
    }

    /// The audio cue this event should trigger, if any
    pub fn cue(&self) -> Option<Cue> {
        match self {
            Event::CycleFinished { .. } => Some(Cue::Progress),
            Event::SessionFinished { .. } => Some(Cue::Complete),
            Event::PromptStarted(cue) => Some(*cue),
            _ => None,
        }
    }
}
