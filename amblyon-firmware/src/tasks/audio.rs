//! Audio cue task
//!
//! Owns the DFPlayer module and plays queued cues. The module needs a
//! couple of seconds after power-up before it accepts commands.

use defmt::*;
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::BufferedUartTx;
use embassy_time::Timer;

use amblyon_drivers::audio::DfPlayer;

use crate::channels::CUE_CHANNEL;

/// Playback volume (module range is 0-30)
const VOLUME: u8 = 30;

/// Audio task - initializes the player and plays queued cues
#[embassy_executor::task]
pub async fn audio_task(tx: BufferedUartTx<'static, UART0>) {
    info!("Audio task started");

    let mut player = DfPlayer::new(tx);

    // Module boot time before it accepts serial commands
    Timer::after_millis(2_000).await;
    if player.set_volume(VOLUME).await.is_err() {
        warn!("Failed to set audio volume");
    }

    loop {
        let cue = CUE_CHANNEL.receive().await;
        debug!("Playing cue: {:?}", cue);
        if player.play_track(cue.track()).await.is_err() {
            warn!("Failed to play cue {:?}", cue);
        }
    }
}
