//! Front-panel button task
//!
//! The two push buttons are active-low with pull-ups. Each has its own
//! debouncer so a bouncy blink button cannot lock out the wait button.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::gpio::Input;
use embassy_time::Instant;

use amblyon_core::input::{Button, Debouncer};

use crate::channels::BUTTON_CHANNEL;

/// Button task - forwards debounced presses to the controller
#[embassy_executor::task]
pub async fn buttons_task(mut blink: Input<'static>, mut wait: Input<'static>) {
    info!("Button task started");

    let mut blink_debounce = Debouncer::new();
    let mut wait_debounce = Debouncer::new();
    let start = Instant::now();

    loop {
        let button = match select(blink.wait_for_falling_edge(), wait.wait_for_falling_edge()).await
        {
            Either::First(_) => Button::Blink,
            Either::Second(_) => Button::Wait,
        };

        let now_ms = start.elapsed().as_millis() as u32;
        let debouncer = match button {
            Button::Blink => &mut blink_debounce,
            Button::Wait => &mut wait_debounce,
        };
        if debouncer.accept(now_ms) {
            debug!("Button pressed: {:?}", button);
            let _ = BUTTON_CHANNEL.try_send(button);
        }
    }
}
