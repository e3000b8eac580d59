//! Main controller task
//!
//! Coordinates the session, trainer and menu state machines. Receives
//! keypad and button presses plus tick signals, pushes lamp, projector
//! and backlight commands, queues audio cues and renders the screen.

use defmt::*;
use embassy_futures::select::{select3, Either3};

use amblyon_core::config::Settings;
use amblyon_core::state::Event;

use crate::channels::{
    BACKLIGHT_CMD, BUTTON_CHANNEL, CUE_CHANNEL, KEY_CHANNEL, LAMP_CMD, PROJECTOR_CMD,
    SCREEN_UPDATE, SETTINGS_SAVE,
};
use crate::controller::Controller;
use crate::display::{Renderer, Screen};
use crate::tasks::display::SCREEN_BUFFER;
use crate::tasks::tick::TICK_SIGNAL;

/// Controller task - main coordination loop
#[embassy_executor::task]
pub async fn controller_task(settings: Settings) {
    info!("Controller task started");

    let mut controller = Controller::new(settings);
    let mut renderer = Renderer::new();
    let mut last_screen = Screen::new();
    let mut now_ms = 0u32;

    // Boot splash until the first tick renders the idle screen
    renderer.render_boot();
    sync_screen(&renderer, &mut last_screen).await;
    push_outputs(&mut controller, now_ms);

    loop {
        match select3(
            KEY_CHANNEL.receive(),
            BUTTON_CHANNEL.receive(),
            TICK_SIGNAL.wait(),
        )
        .await
        {
            Either3::First(key) => {
                debug!("Key: {:?}", key);
                if let Some(to_save) = controller.process_key(key, now_ms) {
                    SETTINGS_SAVE.signal(to_save);
                }
            }

            Either3::Second(button) => {
                debug!("Button: {:?}", button);
                if let Some(event) = controller.process_button(button, now_ms) {
                    queue_cue(&controller, event);
                }
            }

            Either3::Third(tick_ms) => {
                now_ms = tick_ms;
                if let Some(event) = controller.tick(now_ms) {
                    debug!("Event: {:?}", event);
                    queue_cue(&controller, event);
                }
            }
        }

        push_outputs(&mut controller, now_ms);
        render_current(&controller, &mut renderer, now_ms);
        sync_screen(&renderer, &mut last_screen).await;
    }
}

/// Queue the audio cue for an event, if it has one
fn queue_cue(controller: &Controller, event: Event) {
    if let Some(cue) = controller.cue_for(event) {
        let _ = CUE_CHANNEL.try_send(cue);
    }
}

/// Push the current output commands to the hardware tasks
fn push_outputs(controller: &mut Controller, now_ms: u32) {
    LAMP_CMD.signal(controller.lamp_command());
    PROJECTOR_CMD.signal(controller.projector_command(now_ms));
    BACKLIGHT_CMD.signal(controller.backlight_command());
}

/// Render the screen for the current UI state
fn render_current(controller: &Controller, renderer: &mut Renderer, now_ms: u32) {
    if controller.menu().is_editing() {
        renderer.render_menu(controller.settings(), controller.menu().cursor());
    } else if controller.saved_notice_active(now_ms) {
        renderer.render_notice("Settings saved");
    } else if let Some(notice) = controller.active_notice(now_ms) {
        renderer.render_notice(notice.text());
    } else {
        let settings = controller.settings();
        renderer.render_run(
            controller.mode(),
            controller.session().remaining_s(now_ms, settings),
            controller.session().completed(),
            settings.quantity,
        );
    }
}

/// Copy the rendered screen to the shared buffer when it changed
async fn sync_screen(renderer: &Renderer, last: &mut Screen) {
    if *renderer.screen() != *last {
        *last = *renderer.screen();
        let mut buffer = SCREEN_BUFFER.lock().await;
        *buffer = *last;
        SCREEN_UPDATE.signal(());
    }
}
