//! Screen rendering
//!
//! Builds screens for the different UI states. The display is a 16x2
//! character module; the screen buffer holds raw character codes so the
//! HD44780 ROM arrow glyph (code 126) can mark the menu cursor.

use core::fmt::Write;

use amblyon_core::config::{Field, Settings};
use amblyon_core::state::Mode;
use heapless::String;

/// Columns per row
pub const COLS: usize = 16;
/// Display rows
pub const ROWS: usize = 2;

/// HD44780 ROM right-arrow glyph, used as the menu cursor
pub const ARROW: u8 = 126;

/// A screen buffer of raw character codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Screen {
    rows: [[u8; COLS]; ROWS],
}

impl Screen {
    /// Create a blank screen
    pub const fn new() -> Self {
        Self {
            rows: [[b' '; COLS]; ROWS],
        }
    }

    /// Blank both rows
    pub fn clear(&mut self) {
        self.rows = [[b' '; COLS]; ROWS];
    }

    /// Write text at a position, clipped to the row
    pub fn write_str(&mut self, row: usize, col: usize, text: &str) {
        if row >= ROWS {
            return;
        }
        for (i, byte) in text.bytes().enumerate() {
            let c = col + i;
            if c >= COLS {
                break;
            }
            self.rows[row][c] = byte;
        }
    }

    /// Place a single character code
    pub fn set_code(&mut self, row: usize, col: usize, code: u8) {
        if row < ROWS && col < COLS {
            self.rows[row][col] = code;
        }
    }

    /// One row of character codes
    pub fn row(&self, row: usize) -> &[u8; COLS] {
        &self.rows[row.min(ROWS - 1)]
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Builds screens into an internal buffer
pub struct Renderer {
    screen: Screen,
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// The last rendered screen
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Boot splash
    pub fn render_boot(&mut self) {
        self.screen.clear();
        self.screen.write_str(0, 4, "Amblyon");
        self.screen.write_str(1, 1, "vision trainer");
    }

    /// Settings menu: fixed field pairs per page, arrow on the cursor row
    ///
    /// Pages are interval/brightness, quantity/time and length alone; the
    /// arrow glyph moves between the two rows within a page.
    pub fn render_menu(&mut self, settings: &Settings, cursor: Field) {
        self.screen.clear();

        let (top, bottom) = match cursor {
            Field::Interval | Field::Brightness => (Field::Interval, Some(Field::Brightness)),
            Field::Quantity | Field::Time => (Field::Quantity, Some(Field::Time)),
            Field::Length => (Field::Length, None),
        };

        let mut line: String<16> = String::new();
        field_line(settings, top, &mut line);
        self.screen.write_str(0, 1, &line);

        if let Some(bottom) = bottom {
            line.clear();
            field_line(settings, bottom, &mut line);
            self.screen.write_str(1, 1, &line);
        }

        let arrow_row = (cursor.index() % 2) as usize;
        self.screen.set_code(arrow_row, 0, ARROW);
    }

    /// Run screen: remaining time on top, repetition count below
    pub fn render_run(&mut self, mode: Mode, remaining_s: u16, completed: u16, quantity: u16) {
        self.screen.clear();

        let label = match mode {
            Mode::Blinking(_) => "Blink",
            Mode::Waiting => "Wait",
            Mode::Idle => "Ready",
        };
        self.screen.write_str(0, 0, label);

        let mut time: String<8> = String::new();
        let _ = write!(time, "{}:{:02}", remaining_s / 60, remaining_s % 60);
        self.screen.write_str(0, COLS - time.len(), &time);

        self.screen.write_str(1, 0, "Count");
        let mut count: String<12> = String::new();
        let _ = write!(count, "{}/{}", completed, quantity);
        self.screen.write_str(1, COLS - count.len(), &count);
    }

    /// Full-screen transient notice, centered on the top row
    pub fn render_notice(&mut self, text: &str) {
        self.screen.clear();
        let col = (COLS.saturating_sub(text.len())) / 2;
        self.screen.write_str(0, col, text);
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// One menu line: field label plus its current value
fn field_line(settings: &Settings, field: Field, out: &mut String<16>) {
    let _ = match field {
        Field::Interval => write!(
            out,
            "Interval  {}.{}s",
            settings.interval_ds / 10,
            settings.interval_ds % 10
        ),
        Field::Brightness => write!(out, "Bright    {}%", settings.brightness),
        Field::Quantity => write!(out, "Quantity  {}", settings.quantity),
        Field::Time => write!(out, "Time      {}s", settings.time_s),
        Field::Length => write!(
            out,
            "Length    {}.{}s",
            settings.length_ds / 10,
            settings.length_ds % 10
        ),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use amblyon_core::config::BlinkMode;

    fn row_text(screen: &Screen, row: usize) -> &str {
        core::str::from_utf8(screen.row(row)).unwrap()
    }

    #[test]
    fn test_menu_shows_arrow_on_cursor_row() {
        let mut r = Renderer::new();
        r.render_menu(&Settings::default(), Field::Interval);

        assert_eq!(r.screen().row(0)[0], ARROW);
        assert_eq!(row_text(r.screen(), 0), "\u{7e}Interval  0.2s ");
        assert_eq!(row_text(r.screen(), 1), " Bright    100% ");
    }

    #[test]
    fn test_menu_page_is_fixed_while_arrow_moves() {
        let mut r = Renderer::new();
        // Same page for both fields of a pair, only the arrow row changes
        r.render_menu(&Settings::default(), Field::Brightness);
        assert_eq!(row_text(r.screen(), 0), " Interval  0.2s ");
        assert_eq!(row_text(r.screen(), 1), "\u{7e}Bright    100% ");

        r.render_menu(&Settings::default(), Field::Time);
        assert_eq!(row_text(r.screen(), 0), " Quantity  2    ");
        assert_eq!(row_text(r.screen(), 1), "\u{7e}Time      10s  ");
    }

    #[test]
    fn test_last_menu_page_has_blank_second_row() {
        let mut r = Renderer::new();
        r.render_menu(&Settings::default(), Field::Length);
        assert_eq!(row_text(r.screen(), 0), "\u{7e}Length    0.2s ");
        assert_eq!(row_text(r.screen(), 1), "                ");
    }

    #[test]
    fn test_run_screen_formats_time_and_count() {
        let mut r = Renderer::new();
        r.render_run(Mode::Blinking(BlinkMode::Joint), 65, 1, 2);
        assert_eq!(row_text(r.screen(), 0), "Blink       1:05");
        assert_eq!(row_text(r.screen(), 1), "Count        1/2");
    }

    #[test]
    fn test_idle_run_screen() {
        let mut r = Renderer::new();
        r.render_run(Mode::Idle, 10, 0, 2);
        assert_eq!(row_text(r.screen(), 0), "Ready       0:10");
    }

    #[test]
    fn test_notice_is_centered() {
        let mut r = Renderer::new();
        r.render_notice("Settings saved");
        assert_eq!(row_text(r.screen(), 0), " Settings saved ");
        assert_eq!(row_text(r.screen(), 1), "                ");
    }

    #[test]
    fn test_write_str_clips_at_row_end() {
        let mut s = Screen::new();
        s.write_str(0, 12, "overflowing");
        assert_eq!(&s.row(0)[12..], b"over");
    }
}
