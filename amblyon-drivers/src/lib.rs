//! Hardware driver implementations
//!
//! Concrete drivers for the trainer's peripherals:
//!
//! - Serial audio cue player (DFPlayer Mini protocol)
//! - Character display (HD44780 behind a PCF8574 I2C expander)
//! - Matrix keypad scanner

#![no_std]
#![deny(unsafe_code)]

pub mod audio;
pub mod display;
pub mod keypad;
