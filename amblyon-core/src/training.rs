//! Automatic training orchestrator
//!
//! Runs the staged warm-up sequence: each eye gets an audio prompt, a
//! dwell, then a projector pulse, followed by a both-eyes prompt and a
//! handoff to the blink session. One enumerated stage at a time; every
//! transition is driven by a deadline check in `tick`.

use crate::cue::Cue;
use crate::state::{Event, EyeSide};

/// How long a prompt stage lasts before the next stage begins
pub const PROMPT_DWELL_MS: u32 = 2_000;

/// Stage of the automatic training sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Stage {
    #[default]
    Idle,
    /// Left-eye prompt playing, left backlight lit
    LeftPrompt,
    /// Left projector held open
    LeftProjector,
    RightPrompt,
    RightProjector,
    /// Both-eyes prompt before the blink handoff
    BothPrompt,
}

impl Stage {
    /// Check if the sequence is running
    pub fn is_active(&self) -> bool {
        !matches!(self, Stage::Idle)
    }
}

/// Which projector triggers are held open in the current stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProjectorCommand {
    pub left: bool,
    pub right: bool,
}

impl ProjectorCommand {
    pub const fn off() -> Self {
        Self {
            left: false,
            right: false,
        }
    }
}

/// Which display backlights are lit in the current stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BacklightCommand {
    pub left: bool,
    pub right: bool,
}

impl BacklightCommand {
    pub const fn off() -> Self {
        Self {
            left: false,
            right: false,
        }
    }

    pub const fn both() -> Self {
        Self {
            left: true,
            right: true,
        }
    }
}

/// Staged warm-up sequence runner
#[derive(Debug, Clone, Default)]
pub struct AutoTrainer {
    stage: Stage,
    stage_entered_ms: u32,
}

impl AutoTrainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Check if the sequence is running
    pub fn is_active(&self) -> bool {
        self.stage.is_active()
    }

    /// Begin the sequence with the left-eye prompt
    pub fn start(&mut self, now_ms: u32) -> Event {
        self.stage = Stage::LeftPrompt;
        self.stage_entered_ms = now_ms;
        Event::PromptStarted(Cue::LeftEye)
    }

    /// Abort the sequence and release both projectors
    pub fn cancel(&mut self) {
        self.stage = Stage::Idle;
    }

    /// Advance the sequence
    ///
    /// `length_ms` is the projector hold time. At most one stage
    /// transition happens per call.
    pub fn tick(&mut self, now_ms: u32, length_ms: u32) -> Option<Event> {
        let elapsed = now_ms.wrapping_sub(self.stage_entered_ms);
        let (next, event) = match self.stage {
            Stage::Idle => return None,
            Stage::LeftPrompt if elapsed >= PROMPT_DWELL_MS => {
                (Stage::LeftProjector, Event::PulseStarted(EyeSide::Left))
            }
            Stage::LeftProjector if elapsed >= length_ms => {
                (Stage::RightPrompt, Event::PromptStarted(Cue::RightEye))
            }
            Stage::RightPrompt if elapsed >= PROMPT_DWELL_MS => {
                (Stage::RightProjector, Event::PulseStarted(EyeSide::Right))
            }
            Stage::RightProjector if elapsed >= length_ms => {
                (Stage::BothPrompt, Event::PromptStarted(Cue::BothEyes))
            }
            Stage::BothPrompt if elapsed >= PROMPT_DWELL_MS => {
                self.stage = Stage::Idle;
                return Some(Event::BlinkHandoff);
            }
            _ => return None,
        };
        self.stage = next;
        self.stage_entered_ms = now_ms;
        Some(event)
    }

    /// Projector triggers for the current stage
    pub fn projector_command(&self) -> ProjectorCommand {
        match self.stage {
            Stage::LeftProjector => ProjectorCommand {
                left: true,
                right: false,
            },
            Stage::RightProjector => ProjectorCommand {
                left: false,
                right: true,
            },
            _ => ProjectorCommand::off(),
        }
    }

    /// Backlights for the current stage
    ///
    /// The backlight follows the eye being exercised and both come on for
    /// the both-eyes prompt.
    pub fn backlight_command(&self) -> BacklightCommand {
        match self.stage {
            Stage::LeftPrompt | Stage::LeftProjector => BacklightCommand {
                left: true,
                right: false,
            },
            Stage::RightPrompt | Stage::RightProjector => BacklightCommand {
                left: false,
                right: true,
            },
            Stage::BothPrompt => BacklightCommand::both(),
            Stage::Idle => BacklightCommand::off(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LENGTH_MS: u32 = 200;

    #[test]
    fn test_full_sequence_in_order() {
        let mut trainer = AutoTrainer::new();
        assert_eq!(trainer.tick(0, LENGTH_MS), None);

        assert_eq!(trainer.start(0), Event::PromptStarted(Cue::LeftEye));
        assert_eq!(trainer.stage(), Stage::LeftPrompt);

        // Dwell not elapsed yet
        assert_eq!(trainer.tick(1_999, LENGTH_MS), None);

        assert_eq!(
            trainer.tick(2_000, LENGTH_MS),
            Some(Event::PulseStarted(EyeSide::Left))
        );
        assert_eq!(
            trainer.projector_command(),
            ProjectorCommand { left: true, right: false }
        );

        assert_eq!(
            trainer.tick(2_200, LENGTH_MS),
            Some(Event::PromptStarted(Cue::RightEye))
        );
        assert_eq!(trainer.projector_command(), ProjectorCommand::off());

        assert_eq!(
            trainer.tick(4_200, LENGTH_MS),
            Some(Event::PulseStarted(EyeSide::Right))
        );
        assert_eq!(
            trainer.projector_command(),
            ProjectorCommand { left: false, right: true }
        );

        assert_eq!(
            trainer.tick(4_400, LENGTH_MS),
            Some(Event::PromptStarted(Cue::BothEyes))
        );
        assert_eq!(trainer.backlight_command(), BacklightCommand::both());

        assert_eq!(trainer.tick(6_400, LENGTH_MS), Some(Event::BlinkHandoff));
        assert_eq!(trainer.stage(), Stage::Idle);
        assert_eq!(trainer.projector_command(), ProjectorCommand::off());
        assert_eq!(trainer.backlight_command(), BacklightCommand::off());
    }

    #[test]
    fn test_one_transition_per_tick() {
        // A very late poll still advances only one stage
        let mut trainer = AutoTrainer::new();
        trainer.start(0);
        assert_eq!(
            trainer.tick(60_000, LENGTH_MS),
            Some(Event::PulseStarted(EyeSide::Left))
        );
        assert_eq!(trainer.stage(), Stage::LeftProjector);
    }

    #[test]
    fn test_zero_length_skips_projector_hold() {
        let mut trainer = AutoTrainer::new();
        trainer.start(0);
        trainer.tick(2_000, 0);
        assert_eq!(trainer.stage(), Stage::LeftProjector);
        // Next poll moves straight on
        assert_eq!(
            trainer.tick(2_010, 0),
            Some(Event::PromptStarted(Cue::RightEye))
        );
    }

    #[test]
    fn test_backlight_follows_exercised_eye() {
        let mut trainer = AutoTrainer::new();
        trainer.start(0);
        assert_eq!(
            trainer.backlight_command(),
            BacklightCommand { left: true, right: false }
        );
        trainer.tick(2_000, LENGTH_MS);
        assert_eq!(
            trainer.backlight_command(),
            BacklightCommand { left: true, right: false }
        );
        trainer.tick(2_200, LENGTH_MS);
        assert_eq!(
            trainer.backlight_command(),
            BacklightCommand { left: false, right: true }
        );
    }

    #[test]
    fn test_cancel_releases_projectors() {
        let mut trainer = AutoTrainer::new();
        trainer.start(0);
        trainer.tick(2_000, LENGTH_MS);
        assert!(trainer.projector_command().left);

        trainer.cancel();
        assert_eq!(trainer.stage(), Stage::Idle);
        assert_eq!(trainer.projector_command(), ProjectorCommand::off());
        assert_eq!(trainer.tick(10_000, LENGTH_MS), None);
    }
}
