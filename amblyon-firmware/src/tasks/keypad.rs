//! Keypad scan task
//!
//! Scans the 4x3 matrix and forwards debounced presses to the
//! controller.

use defmt::*;
use embassy_time::{Duration, Instant, Ticker};

use amblyon_core::input::Debouncer;
use amblyon_drivers::keypad::MatrixKeypad;
use amblyon_hal_rp2040::gpio::{Rp2040Input, Rp2040Output};

use crate::channels::KEY_CHANNEL;

/// How often the matrix is scanned
const SCAN_INTERVAL_MS: u64 = 20;

/// Keypad scan task
#[embassy_executor::task]
pub async fn keypad_task(rows: [Rp2040Input<'static>; 4], cols: [Rp2040Output<'static>; 3]) {
    info!("Keypad task started");

    let mut keypad = MatrixKeypad::new(rows, cols);
    let mut debouncer = Debouncer::new();
    let mut ticker = Ticker::every(Duration::from_millis(SCAN_INTERVAL_MS));
    let start = Instant::now();

    loop {
        ticker.next().await;

        if let Some(key) = keypad.poll() {
            let now_ms = start.elapsed().as_millis() as u32;
            if debouncer.accept(now_ms) {
                debug!("Key pressed: {:?}", key);
                let _ = KEY_CHANNEL.try_send(key);
            }
        }
    }
}
