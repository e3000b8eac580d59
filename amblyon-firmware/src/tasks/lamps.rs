//! Lamp PWM task
//!
//! Drives both lamp channels from one PWM slice. The slice top is 255 so
//! the controller's 8-bit duty values map directly to compare levels.

use defmt::*;
use embassy_rp::pwm::{Config as PwmConfig, Pwm};

use crate::channels::LAMP_CMD;

/// PWM counter top; duty 255 = fully on
pub const LAMP_PWM_TOP: u16 = 255;

/// Lamp task - applies lamp commands to the PWM slice
///
/// Channel A is the left lamp, channel B the right.
#[embassy_executor::task]
pub async fn lamps_task(mut pwm: Pwm<'static>) {
    info!("Lamp task started");

    let mut config = PwmConfig::default();
    config.top = LAMP_PWM_TOP;
    config.compare_a = 0;
    config.compare_b = 0;
    pwm.set_config(&config);

    loop {
        let cmd = LAMP_CMD.wait().await;
        config.compare_a = cmd.left as u16;
        config.compare_b = cmd.right as u16;
        pwm.set_config(&config);
    }
}
