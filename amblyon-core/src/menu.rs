//! Settings menu
//!
//! Five-field edit menu over the persisted settings. Edits apply to the
//! live settings immediately; the commit (and the saved notice) happens
//! when the menu is left.

use crate::config::{AdjustDir, Field, Settings};

/// How long the "settings saved" notice stays on screen
pub const SAVED_NOTICE_MS: u32 = 1_500;

/// Result of toggling the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuEvent {
    /// Menu opened
    Opened,
    /// Menu left; settings should be written to flash
    Committed,
}

/// Menu cursor and saved-notice state
#[derive(Debug, Clone, Default)]
pub struct SettingsMenu {
    editing: bool,
    cursor: Field,
    notice_until_ms: Option<u32>,
}

impl SettingsMenu {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the menu is open
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    /// Field the cursor points at
    pub fn cursor(&self) -> Field {
        self.cursor
    }

    /// Enter or leave the menu
    pub fn toggle(&mut self, now_ms: u32) -> MenuEvent {
        if self.editing {
            self.editing = false;
            self.cursor = Field::default();
            self.notice_until_ms = Some(now_ms.wrapping_add(SAVED_NOTICE_MS));
            MenuEvent::Committed
        } else {
            self.editing = true;
            self.cursor = Field::default();
            MenuEvent::Opened
        }
    }

    /// Move the cursor down, wrapping past the last field
    pub fn next_field(&mut self) {
        if self.editing {
            self.cursor = self.cursor.next();
        }
    }

    /// Move the cursor up, wrapping past the first field
    pub fn prev_field(&mut self) {
        if self.editing {
            self.cursor = self.cursor.prev();
        }
    }

    /// Step the field under the cursor
    pub fn adjust(&mut self, settings: &mut Settings, dir: AdjustDir) {
        if self.editing {
            settings.adjust(self.cursor, dir);
        }
    }

    /// Check if the saved notice is still showing
    pub fn notice_active(&self, now_ms: u32) -> bool {
        match self.notice_until_ms {
            Some(until) => (now_ms.wrapping_sub(until) as i32) < 0,
            None => false,
        }
    }

    /// Drop the notice once its deadline passed
    pub fn tick(&mut self, now_ms: u32) {
        if let Some(until) = self.notice_until_ms {
            if now_ms.wrapping_sub(until) as i32 >= 0 {
                self.notice_until_ms = None;
            }
        }
    }
}
