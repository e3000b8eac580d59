//! Session controller
//!
//! Tracks the timed blink/waiting session and produces lamp commands.
//! Deterministic in (now, settings, state): all timing is derived from the
//! caller-supplied monotonic millisecond timestamp, compared with
//! `wrapping_sub` so clock rollover is harmless.

use crate::config::{BlinkMode, Settings};
use crate::state::{Event, Mode};

/// PWM duty for the two lamp channels, 0-255 per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LampCommand {
    pub left: u8,
    pub right: u8,
}

impl LampCommand {
    /// Both channels off
    pub const fn off() -> Self {
        Self { left: 0, right: 0 }
    }

    /// Check if both channels are off
    pub fn is_off(&self) -> bool {
        self.left == 0 && self.right == 0
    }
}

/// Map a brightness percentage to an 8-bit PWM duty
///
/// duty = round(brightness * 255 / 100), input clamped to 100.
pub fn duty_from_brightness(percent: u8) -> u8 {
    let percent = percent.min(100) as u32;
    ((percent * 255 + 50) / 100) as u8
}

/// The blink/waiting session state machine
#[derive(Debug, Clone)]
pub struct Session {
    mode: Mode,
    /// Start of the current window
    started_at_ms: u32,
    /// Last lamp phase flip
    last_toggle_ms: u32,
    /// Lamp phase flag; Separate mode derives the right channel as the
    /// complement, so the two channels can never be out of step
    phase_on: bool,
    /// Windows completed in the current run
    completed: u16,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Create an idle session
    pub fn new() -> Self {
        Self {
            mode: Mode::Idle,
            started_at_ms: 0,
            last_toggle_ms: 0,
            phase_on: false,
            completed: 0,
        }
    }

    /// Current run mode
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Check if a session is in progress
    pub fn is_active(&self) -> bool {
        self.mode.is_active()
    }

    /// Windows completed in the current (or last) run
    pub fn completed(&self) -> u16 {
        self.completed
    }

    /// Start a blink session
    pub fn enter_blinking(&mut self, blink_mode: BlinkMode, now_ms: u32) {
        self.mode = Mode::Blinking(blink_mode);
        self.started_at_ms = now_ms;
        self.last_toggle_ms = now_ms;
        self.phase_on = false;
        self.completed = 0;
    }

    /// Start a waiting session
    pub fn enter_waiting(&mut self, now_ms: u32) {
        self.mode = Mode::Waiting;
        self.started_at_ms = now_ms;
    }

    /// Cancel any session and return to idle
    pub fn cancel(&mut self) {
        self.mode = Mode::Idle;
        self.phase_on = false;
        self.completed = 0;
    }

    /// Remaining time in the current window, whole seconds
    pub fn remaining_s(&self, now_ms: u32, settings: &Settings) -> u16 {
        if !self.is_active() {
            return settings.time_s;
        }
        let elapsed_s = (now_ms.wrapping_sub(self.started_at_ms) / 1000) as u16;
        settings.time_s.saturating_sub(elapsed_s)
    }

    /// Advance the session
    ///
    /// Call once per poll iteration. Returns at most one event; a window
    /// can only elapse once per call, so repeated polling cannot
    /// double-increment the completed count.
    pub fn tick(&mut self, now_ms: u32, settings: &Settings) -> Option<Event> {
        match self.mode {
            Mode::Idle => None,
            Mode::Waiting => {
                if now_ms.wrapping_sub(self.started_at_ms) >= settings.time_ms() {
                    self.mode = Mode::Idle;
                    Some(Event::WaitFinished)
                } else {
                    None
                }
            }
            Mode::Blinking(_) => {
                if now_ms.wrapping_sub(self.started_at_ms) >= settings.time_ms() {
                    self.finish_window(now_ms, settings)
                } else {
                    if settings.interval_ms() != 0
                        && now_ms.wrapping_sub(self.last_toggle_ms) >= settings.interval_ms()
                    {
                        self.last_toggle_ms = now_ms;
                        self.phase_on = !self.phase_on;
                    }
                    None
                }
            }
        }
    }

    /// One blink window elapsed: either start the next or finish the run
    fn finish_window(&mut self, now_ms: u32, settings: &Settings) -> Option<Event> {
        self.phase_on = false;

        if settings.quantity == 0 {
            // Nothing to count; a single window is the whole run
            self.mode = Mode::Idle;
            return Some(Event::SessionFinished { completed: 0 });
        }

        self.completed += 1;
        if self.completed >= settings.quantity {
            self.mode = Mode::Idle;
            return Some(Event::SessionFinished {
                completed: self.completed,
            });
        }

        // Next window starts immediately
        self.started_at_ms = now_ms;
        self.last_toggle_ms = now_ms;
        Some(Event::CycleFinished {
            completed: self.completed,
        })
    }

    /// Current lamp duty command
    pub fn lamp_command(&self, settings: &Settings) -> LampCommand {
        let blink_mode = match self.mode {
            Mode::Blinking(m) => m,
            _ => return LampCommand::off(),
        };

        let duty = duty_from_brightness(settings.brightness);

        // Zero interval means continuous illumination, no toggling
        if settings.interval_ms() == 0 {
            return LampCommand {
                left: duty,
                right: duty,
            };
        }

        match blink_mode {
            BlinkMode::Joint => {
                let level = if self.phase_on { duty } else { 0 };
                LampCommand {
                    left: level,
                    right: level,
                }
            }
            BlinkMode::Separate => LampCommand {
                left: if self.phase_on { 0 } else { duty },
                right: if self.phase_on { duty } else { 0 },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn settings(interval_ds: u16, brightness: u8, quantity: u16, time_s: u16) -> Settings {
        Settings {
            interval_ds,
            brightness,
            quantity,
            time_s,
            ..Default::default()
        }
    }

    #[test]
    fn test_duty_endpoints() {
        assert_eq!(duty_from_brightness(0), 0);
        assert_eq!(duty_from_brightness(50), 128);
        assert_eq!(duty_from_brightness(100), 255);
        // Out-of-range input clamps rather than overflowing
        assert_eq!(duty_from_brightness(200), 255);
    }

    proptest! {
        #[test]
        fn prop_duty_is_monotonic(b in 0u8..100) {
            prop_assert!(duty_from_brightness(b) <= duty_from_brightness(b + 1));
        }
    }

    #[test]
    fn test_joint_blink_toggles_synchronously() {
        // interval=0.2s, brightness=50 -> duty 128, both channels together
        let s = settings(2, 50, 1, 10);
        let mut session = Session::new();
        session.enter_blinking(BlinkMode::Joint, 0);

        assert_eq!(session.lamp_command(&s), LampCommand::off());

        assert_eq!(session.tick(200, &s), None);
        assert_eq!(session.lamp_command(&s), LampCommand { left: 128, right: 128 });

        assert_eq!(session.tick(400, &s), None);
        assert_eq!(session.lamp_command(&s), LampCommand::off());

        assert_eq!(session.tick(600, &s), None);
        assert_eq!(session.lamp_command(&s), LampCommand { left: 128, right: 128 });
    }

    #[test]
    fn test_separate_blink_is_complementary() {
        let s = settings(2, 100, 1, 10);
        let mut session = Session::new();
        session.enter_blinking(BlinkMode::Separate, 0);

        // One channel is always lit, the other dark
        assert_eq!(session.lamp_command(&s), LampCommand { left: 255, right: 0 });
        session.tick(200, &s);
        assert_eq!(session.lamp_command(&s), LampCommand { left: 0, right: 255 });
        session.tick(400, &s);
        assert_eq!(session.lamp_command(&s), LampCommand { left: 255, right: 0 });
    }

    #[test]
    fn test_zero_interval_holds_lamps_on() {
        let s = settings(0, 80, 1, 10);
        let mut session = Session::new();
        session.enter_blinking(BlinkMode::Joint, 0);

        let duty = duty_from_brightness(80);
        for now in [0, 500, 3000, 9999] {
            session.tick(now, &s);
            assert_eq!(session.lamp_command(&s), LampCommand { left: duty, right: duty });
        }
    }

    #[test]
    fn test_two_consecutive_windows_then_cues() {
        // quantity=2, time=10s, interval=0: two back-to-back constant
        // illumination windows, then progress cue, then completion cue
        let s = settings(0, 100, 2, 10);
        let mut session = Session::new();
        session.enter_blinking(BlinkMode::Joint, 0);

        assert_eq!(session.tick(5_000, &s), None);
        assert!(!session.lamp_command(&s).is_off());

        let first = session.tick(10_000, &s);
        assert_eq!(first, Some(Event::CycleFinished { completed: 1 }));
        assert_eq!(first.unwrap().cue(), Some(crate::cue::Cue::Progress));
        // Second window runs immediately
        assert!(!session.lamp_command(&s).is_off());

        assert_eq!(session.tick(15_000, &s), None);
        let second = session.tick(20_000, &s);
        assert_eq!(second, Some(Event::SessionFinished { completed: 2 }));
        assert_eq!(second.unwrap().cue(), Some(crate::cue::Cue::Complete));

        assert_eq!(session.mode(), Mode::Idle);
        assert!(session.lamp_command(&s).is_off());
    }

    #[test]
    fn test_completed_never_exceeds_quantity() {
        let s = settings(1, 100, 3, 1);
        let mut session = Session::new();
        session.enter_blinking(BlinkMode::Joint, 0);

        let mut events = 0;
        for step in 1..100u32 {
            if let Some(e) = session.tick(step * 1000, &s) {
                events += 1;
                match e {
                    Event::CycleFinished { completed } | Event::SessionFinished { completed } => {
                        assert!(completed <= s.quantity);
                    }
                    _ => panic!("unexpected event"),
                }
            }
        }
        // Exactly Q events: Q-1 progress, 1 completion
        assert_eq!(events, 3);
        assert_eq!(session.completed(), 3);
    }

    #[test]
    fn test_zero_time_completes_instantly() {
        let s = settings(2, 100, 1, 0);
        let mut session = Session::new();
        session.enter_blinking(BlinkMode::Joint, 42);
        assert_eq!(
            session.tick(42, &s),
            Some(Event::SessionFinished { completed: 1 })
        );
        assert_eq!(session.mode(), Mode::Idle);
    }

    #[test]
    fn test_zero_quantity_finishes_without_counting() {
        let s = settings(2, 100, 0, 1);
        let mut session = Session::new();
        session.enter_blinking(BlinkMode::Joint, 0);
        assert_eq!(
            session.tick(1_000, &s),
            Some(Event::SessionFinished { completed: 0 })
        );
    }

    #[test]
    fn test_waiting_finishes_after_time() {
        let s = settings(2, 100, 2, 10);
        let mut session = Session::new();
        session.enter_waiting(1_000);

        assert_eq!(session.tick(5_000, &s), None);
        assert_eq!(session.lamp_command(&s), LampCommand::off());
        assert_eq!(session.tick(11_000, &s), Some(Event::WaitFinished));
        assert_eq!(session.mode(), Mode::Idle);
    }

    #[test]
    fn test_cancel_returns_to_idle() {
        let s = settings(2, 100, 2, 10);
        let mut session = Session::new();
        session.enter_blinking(BlinkMode::Separate, 0);
        session.tick(200, &s);

        session.cancel();
        assert_eq!(session.mode(), Mode::Idle);
        assert_eq!(session.completed(), 0);
        assert_eq!(session.lamp_command(&s), LampCommand::off());
    }

    #[test]
    fn test_remaining_time_counts_down() {
        let s = settings(2, 100, 2, 10);
        let mut session = Session::new();
        assert_eq!(session.remaining_s(0, &s), 10);

        session.enter_blinking(BlinkMode::Joint, 0);
        assert_eq!(session.remaining_s(3_500, &s), 7);
        assert_eq!(session.remaining_s(10_000, &s), 0);
    }
}
