use std::time::Duration;

use clap::Parser;

use crate::constants::*;
use crate::endpoints::Endpoints;
use crate::error::{PresenterError, Result};

#[derive(Debug, Clone, Parser)]
#[command(name = "slideshow-presenter", about = "Full-screen image and audio presenter")]
pub struct Args {
    /// Server that provides /image and /static/audio/
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    pub origin: String,

    #[arg(long)]
    pub fullscreen: bool,

    #[arg(long, default_value_t = 1280, value_parser = clap::value_parser!(i32).range(64..))]
    pub width: i32,

    #[arg(long, default_value_t = 720, value_parser = clap::value_parser!(i32).range(64..))]
    pub height: i32,

    #[arg(long = "fade-ms", default_value_t = 2000)]
    pub fade_ms: u64,

    #[arg(long = "hold-ms", default_value_t = 6000)]
    pub hold_ms: u64,

    #[arg(long = "cursor-idle-ms", default_value_t = 1000)]
    pub cursor_idle_ms: u64,

    #[arg(long = "cursor-grace-ms", default_value_t = 200)]
    pub cursor_grace_ms: u64,

    #[arg(long = "request-timeout-secs", default_value_t = 10, value_parser = clap::value_parser!(u64).range(1..))]
    pub request_timeout_secs: u64,

    #[arg(long = "fetch-workers", default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..=16))]
    pub fetch_workers: u64,

    #[arg(long = "splash-text", default_value = "Click anywhere to begin")]
    pub splash_text: String,

    /// Default log filter; RUST_LOG takes precedence
    #[arg(long = "log-level", default_value = "info")]
    pub log_level: String,
}

/// Delays used by the presenter, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timings {
    pub fade: f32,
    pub hold: f32,
    pub cursor_idle: f32,
    pub cursor_grace: f32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            fade: FADE_DURATION,
            hold: HOLD_DURATION,
            cursor_idle: CURSOR_IDLE_DELAY,
            cursor_grace: CURSOR_GRACE_PERIOD,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PresenterConfig {
    pub endpoints: Endpoints,
    pub fullscreen: bool,
    pub width: i32,
    pub height: i32,
    pub timings: Timings,
    pub request_timeout: Duration,
    pub fetch_workers: usize,
    pub splash_text: String,
}

impl TryFrom<Args> for PresenterConfig {
    type Error = PresenterError;

    fn try_from(args: Args) -> Result<Self> {
        Ok(Self {
            endpoints: Endpoints::new(&args.origin)?,
            fullscreen: args.fullscreen,
            width: args.width,
            height: args.height,
            timings: Timings {
                fade: millis_to_secs(args.fade_ms),
                hold: millis_to_secs(args.hold_ms),
                cursor_idle: millis_to_secs(args.cursor_idle_ms),
                cursor_grace: millis_to_secs(args.cursor_grace_ms),
            },
            request_timeout: Duration::from_secs(args.request_timeout_secs),
            fetch_workers: args.fetch_workers as usize,
            splash_text: args.splash_text,
        })
    }
}

fn millis_to_secs(ms: u64) -> f32 {
    Duration::from_millis(ms).as_secs_f32()
}
