//! Character display

pub mod lcd1602;

pub use lcd1602::{Lcd1602, LcdError, COLS, ROWS};
