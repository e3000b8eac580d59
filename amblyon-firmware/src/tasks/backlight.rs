//! Panel backlight task
//!
//! Mirrors backlight commands onto the two panel LED outputs.

use defmt::*;
use embassy_rp::gpio::Output;

use crate::channels::BACKLIGHT_CMD;

/// Backlight task - drives the left and right panel LEDs
#[embassy_executor::task]
pub async fn backlight_task(mut left: Output<'static>, mut right: Output<'static>) {
    info!("Backlight task started");

    loop {
        let cmd = BACKLIGHT_CMD.wait().await;
        left.set_level(cmd.left.into());
        right.set_level(cmd.right.into());
    }
}
