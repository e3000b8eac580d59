//! RP2040 GPIO trait implementations
//!
//! Wraps `embassy-rp` pin types so drivers written against the shared
//! `amblyon-hal` traits run unchanged on the RP2040.

use embassy_rp::gpio::{Input, Level, Output};

/// Output pin wrapper
pub struct Rp2040Output<'d> {
    pin: Output<'d>,
}

impl<'d> Rp2040Output<'d> {
    pub fn new(pin: Output<'d>) -> Self {
        Self { pin }
    }
}

impl<'d> amblyon_hal::OutputPin for Rp2040Output<'d> {
    fn set_high(&mut self) {
        self.pin.set_high();
    }

    fn set_low(&mut self) {
        self.pin.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.pin.get_output_level() == Level::High
    }
}

/// Input pin wrapper
pub struct Rp2040Input<'d> {
    pin: Input<'d>,
}

impl<'d> Rp2040Input<'d> {
    pub fn new(pin: Input<'d>) -> Self {
        Self { pin }
    }
}

impl<'d> amblyon_hal::InputPin for Rp2040Input<'d> {
    fn is_high(&self) -> bool {
        self.pin.is_high()
    }
}
