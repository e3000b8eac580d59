//! HD44780 16x2 character display behind a PCF8574 I2C expander
//!
//! The expander drives the controller in 4-bit mode with the common
//! backpack wiring:
//!
//! - P0: RS (0 = command, 1 = data)
//! - P1: RW (held low, write only)
//! - P2: EN (strobed high then low to latch a nibble)
//! - P3: backlight
//! - P4-P7: D4-D7
//!
//! Each byte goes out as two nibbles, each strobed with EN.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::I2c;

/// Columns per row
pub const COLS: usize = 16;
/// Display rows
pub const ROWS: usize = 2;

/// Default backpack address (A0-A2 open)
pub const DEFAULT_ADDRESS: u8 = 0x27;

const RS: u8 = 0x01;
const EN: u8 = 0x04;
const BACKLIGHT: u8 = 0x08;

/// HD44780 command bytes
mod cmd {
    pub const CLEAR: u8 = 0x01;
    pub const ENTRY_MODE_INCREMENT: u8 = 0x06;
    pub const DISPLAY_ON: u8 = 0x0C;
    /// 4-bit bus, two lines, 5x8 font
    pub const FUNCTION_SET_4BIT_2LINE: u8 = 0x28;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// DDRAM address of the first column of each row
const ROW_OFFSETS: [u8; ROWS] = [0x00, 0x40];

/// Expand one byte into the four expander writes that latch it
///
/// Two nibbles, each presented with EN high then EN low.
pub fn expand_byte(value: u8, rs_data: bool, backlight: bool) -> [u8; 4] {
    let mut flags = 0u8;
    if rs_data {
        flags |= RS;
    }
    if backlight {
        flags |= BACKLIGHT;
    }
    let high = (value & 0xF0) | flags;
    let low = ((value << 4) & 0xF0) | flags;
    [high | EN, high, low | EN, low]
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LcdError {
    /// I2C transfer failed
    Bus,
}

/// 16x2 character display driver
pub struct Lcd1602<I2C: I2c, D: DelayNs> {
    i2c: I2C,
    delay: D,
    address: u8,
    backlight: bool,
}

impl<I2C: I2c, D: DelayNs> Lcd1602<I2C, D> {
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            backlight: true,
        }
    }

    async fn write_raw(&mut self, byte: u8) -> Result<(), LcdError> {
        self.i2c
            .write(self.address, &[byte])
            .await
            .map_err(|_| LcdError::Bus)
    }

    async fn write_byte(&mut self, value: u8, rs_data: bool) -> Result<(), LcdError> {
        for byte in expand_byte(value, rs_data, self.backlight) {
            self.write_raw(byte).await?;
            // EN pulse width plus controller execution margin
            self.delay.delay_us(50).await;
        }
        Ok(())
    }

    async fn command(&mut self, value: u8) -> Result<(), LcdError> {
        self.write_byte(value, false).await
    }

    /// Initialize the controller into 4-bit mode
    ///
    /// Follows the HD44780 power-on sequence: three 8-bit function-set
    /// nibbles with long waits, then the switch to 4-bit.
    pub async fn init(&mut self) -> Result<(), LcdError> {
        self.delay.delay_ms(50).await;

        for _ in 0..3 {
            let nibble = 0x30 | if self.backlight { BACKLIGHT } else { 0 };
            self.write_raw(nibble | EN).await?;
            self.write_raw(nibble).await?;
            self.delay.delay_ms(5).await;
        }
        let nibble = 0x20 | if self.backlight { BACKLIGHT } else { 0 };
        self.write_raw(nibble | EN).await?;
        self.write_raw(nibble).await?;
        self.delay.delay_us(150).await;

        self.command(cmd::FUNCTION_SET_4BIT_2LINE).await?;
        self.command(cmd::DISPLAY_ON).await?;
        self.command(cmd::ENTRY_MODE_INCREMENT).await?;
        self.clear().await
    }

    /// Clear the display
    pub async fn clear(&mut self) -> Result<(), LcdError> {
        self.command(cmd::CLEAR).await?;
        // Clear is the one slow command
        self.delay.delay_ms(2).await;
        Ok(())
    }

    /// Move the cursor
    pub async fn set_cursor(&mut self, row: usize, col: usize) -> Result<(), LcdError> {
        let row = row.min(ROWS - 1);
        let col = col.min(COLS - 1);
        self.command(cmd::SET_DDRAM_ADDR | (ROW_OFFSETS[row] + col as u8))
            .await
    }

    /// Write raw character codes at the cursor
    ///
    /// Codes pass straight to the controller, so ROM glyphs outside
    /// ASCII (the 0x7E arrow) work as-is.
    pub async fn write_codes(&mut self, codes: &[u8]) -> Result<(), LcdError> {
        for &code in codes {
            self.write_byte(code, true).await?;
        }
        Ok(())
    }

    /// Replace one full row
    pub async fn write_row(&mut self, row: usize, codes: &[u8; COLS]) -> Result<(), LcdError> {
        self.set_cursor(row, 0).await?;
        self.write_codes(codes).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_splits_nibbles_high_first() {
        let seq = expand_byte(0xA5, false, false);
        assert_eq!(seq[0] & 0xF0, 0xA0);
        assert_eq!(seq[1] & 0xF0, 0xA0);
        assert_eq!(seq[2] & 0xF0, 0x50);
        assert_eq!(seq[3] & 0xF0, 0x50);
    }

    #[test]
    fn test_expand_strobes_enable_per_nibble() {
        let seq = expand_byte(0x00, false, false);
        assert_eq!(seq[0] & EN, EN);
        assert_eq!(seq[1] & EN, 0);
        assert_eq!(seq[2] & EN, EN);
        assert_eq!(seq[3] & EN, 0);
    }

    #[test]
    fn test_expand_sets_rs_for_data() {
        for byte in expand_byte(0x41, true, false) {
            assert_eq!(byte & RS, RS);
        }
        for byte in expand_byte(0x41, false, false) {
            assert_eq!(byte & RS, 0);
        }
    }

    #[test]
    fn test_expand_carries_backlight_bit() {
        for byte in expand_byte(0x41, false, true) {
            assert_eq!(byte & BACKLIGHT, BACKLIGHT);
        }
    }

    #[test]
    fn test_row_offsets_match_ddram_map() {
        assert_eq!(cmd::SET_DDRAM_ADDR | ROW_OFFSETS[0], 0x80);
        assert_eq!(cmd::SET_DDRAM_ADDR | ROW_OFFSETS[1], 0xC0);
    }
}
