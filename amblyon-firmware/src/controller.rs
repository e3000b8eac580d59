//! Main controller coordinating session, trainer, menu and inputs
//!
//! The controller is the central brain that:
//! - Decodes keypad and button presses into actions
//! - Advances the session and training state machines on every tick
//! - Produces lamp, projector and backlight commands for the output tasks
//! - Tracks the transient notice shown after mode changes

use amblyon_core::config::{Settings, TrainingMode};
use amblyon_core::cue::Cue;
use amblyon_core::input::{Button, Command, Key};
use amblyon_core::menu::{MenuEvent, SettingsMenu, SAVED_NOTICE_MS};
use amblyon_core::pulse::PulseTimer;
use amblyon_core::session::{LampCommand, Session};
use amblyon_core::state::{Event, EyeSide, Mode};
use amblyon_core::training::{AutoTrainer, BacklightCommand, ProjectorCommand};

/// Transient full-screen notice after a mode-toggle key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notice {
    JointMode,
    SeparateMode,
    ManualTraining,
    AutomaticTraining,
    Muted,
    Unmuted,
}

impl Notice {
    pub fn text(&self) -> &'static str {
        match self {
            Notice::JointMode => "Joint blinking",
            Notice::SeparateMode => "Separate blink",
            Notice::ManualTraining => "Manual training",
            Notice::AutomaticTraining => "Auto training",
            Notice::Muted => "Sound off",
            Notice::Unmuted => "Sound on",
        }
    }
}

/// Controller state for coordinating subsystems
pub struct Controller {
    settings: Settings,
    session: Session,
    trainer: AutoTrainer,
    menu: SettingsMenu,
    /// Manual projector pulses, one timer per side
    left_pulse: PulseTimer,
    right_pulse: PulseTimer,
    notice: Option<Notice>,
    notice_until_ms: u32,
}

impl Controller {
    /// Create a new controller with the loaded settings
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            session: Session::new(),
            trainer: AutoTrainer::new(),
            menu: SettingsMenu::new(),
            left_pulse: PulseTimer::new(),
            right_pulse: PulseTimer::new(),
            notice: None,
            notice_until_ms: 0,
        }
    }

    /// Current settings
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Settings menu state, for rendering
    pub fn menu(&self) -> &SettingsMenu {
        &self.menu
    }

    /// Session state, for rendering
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Training sequence state
    pub fn trainer(&self) -> &AutoTrainer {
        &self.trainer
    }

    /// The notice to show, if one is active at `now_ms`
    pub fn active_notice(&self, now_ms: u32) -> Option<Notice> {
        match self.notice {
            Some(n) if (now_ms.wrapping_sub(self.notice_until_ms) as i32) < 0 => Some(n),
            _ => None,
        }
    }

    /// Check if the "settings saved" notice is showing
    pub fn saved_notice_active(&self, now_ms: u32) -> bool {
        self.menu.notice_active(now_ms)
    }

    fn show_notice(&mut self, notice: Notice, now_ms: u32) {
        self.notice = Some(notice);
        self.notice_until_ms = now_ms.wrapping_add(SAVED_NOTICE_MS);
    }

    fn stop_all(&mut self) {
        self.session.cancel();
        self.trainer.cancel();
        self.left_pulse.cancel();
        self.right_pulse.cancel();
    }

    /// Process a keypad press
    ///
    /// Returns the settings to persist when leaving the menu.
    pub fn process_key(&mut self, key: Key, now_ms: u32) -> Option<Settings> {
        let command = key.command()?;

        match command {
            Command::ToggleMenu => {
                if !self.menu.is_editing() {
                    // Entering the menu stops any run in progress
                    self.stop_all();
                    self.menu.toggle(now_ms);
                    None
                } else if self.menu.toggle(now_ms) == MenuEvent::Committed {
                    Some(self.settings)
                } else {
                    None
                }
            }
            Command::NextField => {
                self.menu.next_field();
                None
            }
            Command::PrevField => {
                self.menu.prev_field();
                None
            }
            Command::AdjustUp | Command::AdjustDown => {
                if let Some(dir) = command.adjust_dir() {
                    self.menu.adjust(&mut self.settings, dir);
                }
                None
            }
            // Mode toggles act in run mode only, never inside the menu
            Command::SetJointMode if !self.menu.is_editing() => {
                self.settings.blink_mode = amblyon_core::config::BlinkMode::Joint;
                self.show_notice(Notice::JointMode, now_ms);
                None
            }
            Command::SetSeparateMode if !self.menu.is_editing() => {
                self.settings.blink_mode = amblyon_core::config::BlinkMode::Separate;
                self.show_notice(Notice::SeparateMode, now_ms);
                None
            }
            Command::ToggleTraining if !self.menu.is_editing() => {
                self.settings.training_mode = self.settings.training_mode.toggled();
                if self.settings.training_mode == TrainingMode::Manual {
                    self.trainer.cancel();
                }
                let notice = match self.settings.training_mode {
                    TrainingMode::Manual => Notice::ManualTraining,
                    TrainingMode::Automatic => Notice::AutomaticTraining,
                };
                self.show_notice(notice, now_ms);
                None
            }
            Command::ToggleMute if !self.menu.is_editing() => {
                self.settings.mute = !self.settings.mute;
                let notice = if self.settings.mute {
                    Notice::Muted
                } else {
                    Notice::Unmuted
                };
                self.show_notice(notice, now_ms);
                None
            }
            Command::Pulse(side)
                if !self.menu.is_editing()
                    && self.settings.training_mode == TrainingMode::Manual =>
            {
                let timer = match side {
                    EyeSide::Left => &mut self.left_pulse,
                    EyeSide::Right => &mut self.right_pulse,
                };
                timer.start(now_ms, self.settings.length_ms());
                None
            }
            _ => None,
        }
    }

    /// Process a front-panel button press
    ///
    /// Returns the event raised by starting the training sequence.
    pub fn process_button(&mut self, button: Button, now_ms: u32) -> Option<Event> {
        if self.menu.is_editing() {
            return None;
        }

        // Either button stops a run in progress
        if self.session.is_active() || self.trainer.is_active() {
            self.stop_all();
            return None;
        }

        match button {
            Button::Blink => match self.settings.training_mode {
                TrainingMode::Manual => {
                    self.session
                        .enter_blinking(self.settings.blink_mode, now_ms);
                    None
                }
                TrainingMode::Automatic => Some(self.trainer.start(now_ms)),
            },
            Button::Wait => {
                self.session.enter_waiting(now_ms);
                None
            }
        }
    }

    /// Periodic tick: advance the trainer and the session
    pub fn tick(&mut self, now_ms: u32) -> Option<Event> {
        self.menu.tick(now_ms);
        if self.notice.is_some() && self.active_notice(now_ms).is_none() {
            self.notice = None;
        }

        if let Some(event) = self.trainer.tick(now_ms, self.settings.length_ms()) {
            if event == Event::BlinkHandoff {
                self.session
                    .enter_blinking(self.settings.blink_mode, now_ms);
            }
            return Some(event);
        }

        self.session.tick(now_ms, &self.settings)
    }

    /// Current lamp command
    pub fn lamp_command(&self) -> LampCommand {
        self.session.lamp_command(&self.settings)
    }

    /// Current projector command
    ///
    /// The trainer owns the projectors while it runs; otherwise the
    /// manual pulse timers drive them.
    pub fn projector_command(&mut self, now_ms: u32) -> ProjectorCommand {
        if self.trainer.is_active() {
            self.trainer.projector_command()
        } else {
            ProjectorCommand {
                left: self.left_pulse.is_held(now_ms),
                right: self.right_pulse.is_held(now_ms),
            }
        }
    }

    /// Current backlight command
    ///
    /// The trainer owns the backlights while it runs. Otherwise both
    /// panels are lit only in manual mode with no session running; they
    /// go dark during sessions and in automatic mode.
    pub fn backlight_command(&self) -> BacklightCommand {
        if self.trainer.is_active() {
            self.trainer.backlight_command()
        } else if self.settings.training_mode == TrainingMode::Manual
            && !self.session.is_active()
        {
            BacklightCommand::both()
        } else {
            BacklightCommand::off()
        }
    }

    /// The audio cue to play for an event, honoring the mute setting
    pub fn cue_for(&self, event: Event) -> Option<Cue> {
        if self.settings.mute {
            None
        } else {
            event.cue()
        }
    }

    /// Check if a session or training run is in progress
    pub fn is_running(&self) -> bool {
        self.session.is_active() || self.trainer.is_active()
    }

    /// Run mode for rendering
    pub fn mode(&self) -> Mode {
        self.session.mode()
    }
}
