use raylib::prelude::*;
use tracing::warn;

use crate::config::PresenterConfig;
use crate::error::Result;
use crate::fetch::{FetchKind, Fetched, Fetcher, LatestRequests, RequestId};
use crate::player::{AudioOutput, audio_file_type};
use crate::slide::{Slide, draw_splash};
use crate::stage::{Fade, Stage, StageEvent};
use crate::texture_loader::load_texture_from_bytes;

/// raylib side of the presenter: the window contents, the audio output and the fetch workers.
pub struct Screen<'aud> {
    fetcher: Fetcher,
    slide: Slide,
    player: AudioOutput<'aud>,
    splash_text: String,
    slideshow_visible: bool,
    latest: LatestRequests,
}

impl<'aud> Screen<'aud> {
    pub fn new(device: &'aud RaylibAudio, fetcher: Fetcher, config: &PresenterConfig) -> Self {
        Self {
            fetcher,
            slide: Slide::new(config.timings.fade),
            player: AudioOutput::new(device),
            splash_text: config.splash_text.clone(),
            slideshow_visible: false,
            latest: LatestRequests::default(),
        }
    }

    /// Applies finished fetches. Returns the image completions for the slideshow driver.
    pub fn pump(&mut self, rl: &mut RaylibHandle, thread: &RaylibThread) -> Vec<StageEvent> {
        let finished = self.latest.retain_latest(self.fetcher.drain());
        let mut events = Vec::new();

        for fetched in finished {
            match fetched.kind {
                FetchKind::Image => events.push(self.finish_image(rl, thread, fetched)),
                FetchKind::Audio => self.finish_audio(fetched),
            }
        }

        events
    }

    pub fn update(&mut self, dt: f32) {
        self.slide.update(dt);
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        if !self.slideshow_visible {
            draw_splash(d, &self.splash_text);
            return;
        }

        d.clear_background(Color::BLACK);
        self.slide.draw(d);
    }

    fn finish_image(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        fetched: Fetched,
    ) -> StageEvent {
        match fetched
            .body
            .and_then(|bytes| load_texture_from_bytes(rl, thread, bytes))
        {
            Ok(texture) => {
                self.slide.replace(texture);
                StageEvent::ImageLoaded(fetched.id)
            }
            Err(err) => {
                warn!(url = %fetched.url, %err, "Could not load image");
                StageEvent::ImageFailed(fetched.id)
            }
        }
    }

    fn finish_audio(&mut self, fetched: Fetched) {
        let file_type = audio_file_type(&fetched.url);
        let played = fetched
            .body
            .and_then(|bytes| self.player.play(&file_type, &bytes));
        if let Err(err) = played {
            warn!(url = %fetched.url, %err, "Could not play clip");
        }
    }
}

impl Stage for Screen<'_> {
    fn reveal_slideshow(&mut self) {
        self.slideshow_visible = true;
    }

    fn set_fade(&mut self, fade: Fade) {
        self.slide.set_fade(fade);
    }

    fn request_image(&mut self, url: &str) -> Result<RequestId> {
        let id = self.fetcher.submit(FetchKind::Image, url)?;
        self.latest.record(FetchKind::Image, id);
        Ok(id)
    }

    fn play_audio(&mut self, url: &str) -> Result<()> {
        let id = self.fetcher.submit(FetchKind::Audio, url)?;
        self.latest.record(FetchKind::Audio, id);
        Ok(())
    }
}
