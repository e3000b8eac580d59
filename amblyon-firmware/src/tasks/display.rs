//! Display task
//!
//! Owns the 16x2 display and pushes the shared screen buffer to it
//! whenever the controller signals an update.

use defmt::*;
use embassy_rp::i2c::{Async, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::Delay;

use amblyon_drivers::display::lcd1602::DEFAULT_ADDRESS;
use amblyon_drivers::display::Lcd1602;

use crate::channels::SCREEN_UPDATE;
use crate::display::{Screen, ROWS};

/// Shared screen buffer protected by mutex
pub static SCREEN_BUFFER: Mutex<CriticalSectionRawMutex, Screen> = Mutex::new(Screen::new());

/// Display task - initializes the module and applies screen updates
#[embassy_executor::task]
pub async fn display_task(i2c: I2c<'static, I2C0, Async>) {
    info!("Display task started");

    let mut lcd = Lcd1602::new(i2c, Delay, DEFAULT_ADDRESS);
    if lcd.init().await.is_err() {
        warn!("Display init failed");
    }

    loop {
        SCREEN_UPDATE.wait().await;

        let screen = *SCREEN_BUFFER.lock().await;
        for row in 0..ROWS {
            if lcd.write_row(row, screen.row(row)).await.is_err() {
                warn!("Display write failed");
                break;
            }
        }
    }
}
