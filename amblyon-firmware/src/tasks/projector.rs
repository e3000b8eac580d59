//! Projector trigger task
//!
//! Applies projector commands to the two trigger outputs. Timing lives in
//! the controller; this task only mirrors the latest command.

use defmt::*;
use embassy_rp::gpio::Output;

use crate::channels::PROJECTOR_CMD;

/// Projector task - drives the left and right trigger pins
#[embassy_executor::task]
pub async fn projector_task(mut left: Output<'static>, mut right: Output<'static>) {
    info!("Projector task started");

    loop {
        let cmd = PROJECTOR_CMD.wait().await;
        left.set_level(cmd.left.into());
        right.set_level(cmd.right.into());
    }
}
