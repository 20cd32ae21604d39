use anyhow::{Context, Result, anyhow};
use clap::Parser;
use raylib::prelude::*;
use tracing::info;

mod clips;
mod config;
mod constants;
mod cursor;
mod endpoints;
mod error;
mod fetch;
mod latch;
mod logging;
mod player;
mod screen;
mod session;
mod slide;
mod stage;
mod state;
mod texture_loader;
mod timer;

use crate::config::{Args, PresenterConfig};
use crate::constants::*;
use crate::cursor::{CursorChange, CursorIdle};
use crate::endpoints::epoch_millis;
use crate::fetch::Fetcher;
use crate::latch::OneShot;
use crate::screen::Screen;
use crate::session::SlideshowSession;
use crate::slide::draw_splash;

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(&args.log_level)?;

    let config = PresenterConfig::try_from(args).context("Invalid configuration")?;
    info!(origin = config.endpoints.origin(), "Presenter configured");

    run(&config)
}

fn run(config: &PresenterConfig) -> Result<()> {
    let (mut rl, thread) = open_window(config);
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let mut cursor = CursorIdle::new(config.timings.cursor_idle, config.timings.cursor_grace);
    rl.hide_cursor();

    // --- Splash: wait for the gesture that allows audio ---
    let endpoints = config.endpoints.clone();
    let timings = config.timings;
    let on_first_click = OneShot::new(move || SlideshowSession::new(endpoints, timings));

    let Some(mut session) =
        wait_for_first_click(&mut rl, &thread, &mut cursor, &config.splash_text, on_first_click)
    else {
        info!("Window closed before the slideshow started");
        return Ok(());
    };

    // --- Start: one audio device and one screen for the rest of the run ---
    let device = RaylibAudio::init_audio_device()
        .map_err(|e| anyhow!("Failed to open audio device: {e:?}"))?;
    let fetcher = Fetcher::spawn(config.fetch_workers, config.request_timeout)
        .context("Failed to start fetch workers")?;
    let mut screen = Screen::new(&device, fetcher, config);
    session.start(&mut screen);

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        track_cursor(&mut rl, &mut cursor, dt);

        for event in screen.pump(&mut rl, &thread) {
            session.handle(event, &mut screen);
        }
        session.update(dt, epoch_millis(), &mut screen);
        screen.update(dt);

        let mut d = rl.begin_drawing(&thread);
        screen.draw(&mut d);
    }

    info!(cycles = session.cycles(), "Presenter closed");
    Ok(())
}

fn open_window(config: &PresenterConfig) -> (RaylibHandle, RaylibThread) {
    let mut builder = raylib::init();
    builder
        .size(config.width, config.height)
        .title(WINDOW_TITLE)
        .vsync()
        .resizable();
    if config.fullscreen {
        builder.fullscreen();
    }
    builder.build()
}

fn wait_for_first_click<F, T>(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    cursor: &mut CursorIdle,
    splash_text: &str,
    mut on_first_click: OneShot<F>,
) -> Option<T>
where
    F: FnOnce() -> T,
{
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        track_cursor(rl, cursor, dt);

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            if let Some(started) = on_first_click.fire() {
                return Some(started);
            }
        }

        let mut d = rl.begin_drawing(thread);
        draw_splash(&mut d, splash_text);
    }

    None
}

fn track_cursor(rl: &mut RaylibHandle, cursor: &mut CursorIdle, dt: f32) {
    let delta = rl.get_mouse_delta();
    let moved = if delta.x != 0.0 || delta.y != 0.0 {
        cursor.on_mouse_move()
    } else {
        None
    };

    for change in [moved, cursor.update(dt)].into_iter().flatten() {
        match change {
            CursorChange::Shown => rl.show_cursor(),
            CursorChange::Hidden => rl.hide_cursor(),
        }
    }
}
