//! Amblyon - Photic Vision-Training Device Firmware
//!
//! Main firmware binary for RP2040-based trainer boards. Two PWM lamp
//! channels, two projector triggers, audio cues over serial and a 16x2
//! character display, coordinated by a central controller task.
//!
//! Named after amblyopia ("dull eye"), the condition photic blink
//! training addresses.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::pwm::{Config as PwmConfig, Pwm};
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use amblyon_hal_rp2040::flash::FlashStorage;
use amblyon_hal_rp2040::gpio::{Rp2040Input, Rp2040Output};

use crate::config::SettingsStore;
use crate::tasks::lamps::LAMP_PWM_TOP;

mod channels;
mod config;
mod controller;
mod display;
mod tasks;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

// Static cells for UART buffers (must live forever)
static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Amblyon firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    // Flash-backed settings, shared key-value partition at end of flash
    let mut store = SettingsStore::new(FlashStorage::new(p.FLASH, p.DMA_CH0));
    let settings = store.load_or_default().await;
    info!("Settings loaded");

    // UART0 to the DFPlayer audio module (9600 8N1)
    let uart_config = {
        let mut cfg = UartConfig::default();
        cfg.baudrate = 9600;
        cfg
    };
    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let (audio_tx, _audio_rx) = uart.into_buffered(Irqs, tx_buf, rx_buf).split();
    info!("Audio UART initialized");

    // I2C0 to the display backpack
    let display_i2c = I2c::new_async(p.I2C0, p.PIN_21, p.PIN_20, Irqs, i2c::Config::default());

    // Keypad matrix: rows are pulled-up inputs, columns driven low one
    // at a time by the scanner
    let keypad_rows = [
        Rp2040Input::new(Input::new(p.PIN_2, Pull::Up)),
        Rp2040Input::new(Input::new(p.PIN_3, Pull::Up)),
        Rp2040Input::new(Input::new(p.PIN_4, Pull::Up)),
        Rp2040Input::new(Input::new(p.PIN_5, Pull::Up)),
    ];
    let keypad_cols = [
        Rp2040Output::new(Output::new(p.PIN_6, Level::High)),
        Rp2040Output::new(Output::new(p.PIN_7, Level::High)),
        Rp2040Output::new(Output::new(p.PIN_8, Level::High)),
    ];

    // Lamp PWM: one slice drives both channels (A = left, B = right)
    let pwm_config = {
        let mut cfg = PwmConfig::default();
        cfg.top = LAMP_PWM_TOP;
        cfg
    };
    let lamp_pwm = Pwm::new_output_ab(p.PWM_SLICE5, p.PIN_10, p.PIN_11, pwm_config);

    // Panel backlights and projector triggers
    let backlight_left = Output::new(p.PIN_12, Level::Low);
    let backlight_right = Output::new(p.PIN_13, Level::Low);
    let projector_left = Output::new(p.PIN_14, Level::Low);
    let projector_right = Output::new(p.PIN_15, Level::Low);

    // Front-panel buttons, active low
    let blink_button = Input::new(p.PIN_16, Pull::Up);
    let wait_button = Input::new(p.PIN_17, Pull::Up);

    info!("Peripheral setup complete");

    // Spawn tasks
    spawner.spawn(tasks::tick_task()).unwrap();
    spawner.spawn(tasks::keypad_task(keypad_rows, keypad_cols)).unwrap();
    spawner.spawn(tasks::buttons_task(blink_button, wait_button)).unwrap();
    spawner.spawn(tasks::lamps_task(lamp_pwm)).unwrap();
    spawner
        .spawn(tasks::projector_task(projector_left, projector_right))
        .unwrap();
    spawner
        .spawn(tasks::backlight_task(backlight_left, backlight_right))
        .unwrap();
    spawner.spawn(tasks::audio_task(audio_tx)).unwrap();
    spawner.spawn(tasks::display_task(display_i2c)).unwrap();
    spawner.spawn(tasks::storage_task(store)).unwrap();
    spawner.spawn(tasks::controller_task(settings)).unwrap();

    info!("All tasks spawned, firmware running");

    // Main task has nothing else to do - all work happens in spawned tasks
    loop {
        embassy_time::Timer::after_secs(60).await;
        trace!("Main loop heartbeat");
    }
}
