//! DFPlayer Mini serial MP3 module
//!
//! The module speaks a fixed 10-byte frame protocol at 9600 baud (8N1):
//!
//! - Start byte: 0x7E
//! - Version: 0xFF
//! - Length: 0x06 (bytes between version and checksum)
//! - Command
//! - Feedback flag (0x00 = no ack requested)
//! - Parameter (2 bytes, big-endian)
//! - Checksum (2 bytes, big-endian two's complement of the payload sum)
//! - End byte: 0xEF

use embedded_io_async::Write;

/// Frame start byte
const START_BYTE: u8 = 0x7E;
/// Protocol version byte
const VERSION: u8 = 0xFF;
/// Payload length byte (version..parameter, always 6)
const PAYLOAD_LEN: u8 = 0x06;
/// Frame end byte
const END_BYTE: u8 = 0xEF;

/// DFPlayer command bytes
pub mod cmd {
    /// Play the track with the given index
    pub const PLAY_TRACK: u8 = 0x03;
    /// Set volume (0-30)
    pub const SET_VOLUME: u8 = 0x06;
    /// Reset the module
    pub const RESET: u8 = 0x0C;
    /// Stop playback
    pub const STOP: u8 = 0x16;
}

/// Highest volume the module accepts
pub const MAX_VOLUME: u8 = 30;

/// Checksum over version..parameter, two's complement of the byte sum
fn checksum(frame: &[u8; 10]) -> u16 {
    let sum: u16 = frame[1..7].iter().map(|&b| b as u16).sum();
    0u16.wrapping_sub(sum)
}

/// Build a complete command frame
pub fn build_frame(command: u8, param: u16) -> [u8; 10] {
    let mut frame = [0u8; 10];
    frame[0] = START_BYTE;
    frame[1] = VERSION;
    frame[2] = PAYLOAD_LEN;
    frame[3] = command;
    frame[4] = 0x00; // no feedback
    frame[5] = (param >> 8) as u8;
    frame[6] = param as u8;
    let crc = checksum(&frame);
    frame[7] = (crc >> 8) as u8;
    frame[8] = crc as u8;
    frame[9] = END_BYTE;
    frame
}

/// DFPlayer communication errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DfPlayerError {
    /// Serial write failed
    Serial,
}

/// DFPlayer Mini driver over a serial port
pub struct DfPlayer<W: Write> {
    uart: W,
}

impl<W: Write> DfPlayer<W> {
    pub fn new(uart: W) -> Self {
        Self { uart }
    }

    async fn send(&mut self, command: u8, param: u16) -> Result<(), DfPlayerError> {
        let frame = build_frame(command, param);
        self.uart
            .write_all(&frame)
            .await
            .map_err(|_| DfPlayerError::Serial)
    }

    /// Set playback volume, clamped to the module's range
    pub async fn set_volume(&mut self, volume: u8) -> Result<(), DfPlayerError> {
        self.send(cmd::SET_VOLUME, volume.min(MAX_VOLUME) as u16).await
    }

    /// Play a track by its index on the storage card
    pub async fn play_track(&mut self, track: u8) -> Result<(), DfPlayerError> {
        self.send(cmd::PLAY_TRACK, track as u16).await
    }

    /// Stop playback
    pub async fn stop(&mut self) -> Result<(), DfPlayerError> {
        self.send(cmd::STOP, 0).await
    }

    /// Reset the module
    pub async fn reset(&mut self) -> Result<(), DfPlayerError> {
        self.send(cmd::RESET, 0).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_layout() {
        let frame = build_frame(cmd::PLAY_TRACK, 5);

        assert_eq!(frame[0], START_BYTE);
        assert_eq!(frame[1], VERSION);
        assert_eq!(frame[2], PAYLOAD_LEN);
        assert_eq!(frame[3], cmd::PLAY_TRACK);
        assert_eq!(frame[4], 0x00);
        assert_eq!(frame[5], 0x00);
        assert_eq!(frame[6], 0x05);
        assert_eq!(frame[9], END_BYTE);
    }

    #[test]
    fn test_checksum_is_twos_complement_of_payload_sum() {
        let frame = build_frame(cmd::SET_VOLUME, 30);
        let sum: u16 = frame[1..7].iter().map(|&b| b as u16).sum();
        let crc = ((frame[7] as u16) << 8) | frame[8] as u16;
        assert_eq!(crc.wrapping_add(sum), 0);
    }

    #[test]
    fn test_known_play_frame() {
        // Play track 1: documented example frame
        let frame = build_frame(cmd::PLAY_TRACK, 1);
        assert_eq!(
            frame,
            [0x7E, 0xFF, 0x06, 0x03, 0x00, 0x00, 0x01, 0xFE, 0xF7, 0xEF]
        );
    }

    #[test]
    fn test_volume_frame_big_endian_param() {
        let frame = build_frame(cmd::SET_VOLUME, 0x0102);
        assert_eq!(frame[5], 0x01);
        assert_eq!(frame[6], 0x02);
    }
}
