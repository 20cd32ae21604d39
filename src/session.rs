use rand::Rng;
use rand::rngs::ThreadRng;
use tracing::{debug, error, info, warn};

use crate::clips::ClipPicker;
use crate::config::Timings;
use crate::endpoints::{CacheBuster, Endpoints};
use crate::error::Result;
use crate::fetch::RequestId;
use crate::stage::{Fade, Stage, StageEvent};
use crate::state::SlideshowState;
use crate::timer::Timer;

/// Slideshow driver: one per program run, started once and never stopped.
///
/// Each cycle fades the current image out, then requests the next image and clip, then holds
/// before the next cycle. The hold is armed only after the fade wait, so cycles never overlap.
pub struct SlideshowSession<R = ThreadRng> {
    state: SlideshowState,
    endpoints: Endpoints,
    timings: Timings,
    fade_timer: Timer,
    hold_timer: Timer,
    picker: ClipPicker<R>,
    previous_clip: Option<&'static str>,
    cache_buster: CacheBuster,
    pending_image: Option<RequestId>,
    cycles: u64,
}

impl SlideshowSession<ThreadRng> {
    pub fn new(endpoints: Endpoints, timings: Timings) -> Self {
        Self::with_picker(endpoints, timings, ClipPicker::new())
    }
}

impl<R: Rng> SlideshowSession<R> {
    pub fn with_picker(endpoints: Endpoints, timings: Timings, picker: ClipPicker<R>) -> Self {
        Self {
            state: SlideshowState::Splash,
            endpoints,
            timings,
            fade_timer: Timer::new(),
            hold_timer: Timer::new(),
            picker,
            previous_clip: None,
            cache_buster: CacheBuster::new(),
            pending_image: None,
            cycles: 0,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SlideshowState {
        self.state
    }

    #[cfg(test)]
    pub fn previous_clip(&self) -> Option<&'static str> {
        self.previous_clip
    }

    /// Number of cycles that reached the request step.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Leaves the splash and begins the first cycle. Returns `false` if already started.
    pub fn start(&mut self, stage: &mut impl Stage) -> bool {
        if self.state != SlideshowState::Splash {
            return false;
        }

        info!("Starting slideshow");
        stage.reveal_slideshow();
        self.begin_cycle(stage);
        true
    }

    pub fn update(&mut self, dt: f32, now_ms: u64, stage: &mut impl Stage) {
        match self.state {
            SlideshowState::Splash => {}
            SlideshowState::FadingOut => {
                if self.fade_timer.tick(dt) {
                    self.advance(now_ms, stage);
                }
            }
            SlideshowState::Holding => {
                if self.hold_timer.tick(dt) {
                    self.begin_cycle(stage);
                }
            }
        }
    }

    pub fn handle(&mut self, event: StageEvent, stage: &mut impl Stage) {
        match event {
            StageEvent::ImageLoaded(id) => {
                if self.pending_image == Some(id) {
                    self.pending_image = None;
                    info!(request = id.get(), "Image loaded successfully");
                    stage.set_fade(Fade::FadingIn);
                } else {
                    debug!(request = id.get(), "Ignoring load of a superseded image");
                }
            }
            StageEvent::ImageFailed(id) => {
                // No retry: the slide stays faded out until a later image arrives.
                warn!(request = id.get(), "Image failed to load");
            }
        }
    }

    fn begin_cycle(&mut self, stage: &mut impl Stage) {
        debug!(cycle = self.cycles + 1, "Loading next slide");
        stage.set_fade(Fade::FadingOut);
        self.fade_timer.arm(self.timings.fade);
        self.state = SlideshowState::FadingOut;
    }

    fn advance(&mut self, now_ms: u64, stage: &mut impl Stage) {
        let prepared = self
            .request_next_image(now_ms, stage)
            .and_then(|()| self.request_next_clip(stage));

        if let Err(err) = prepared {
            error!(%err, "Error preparing next slide");
        }

        self.cycles += 1;
        self.hold_timer.arm(self.timings.hold);
        self.state = SlideshowState::Holding;
    }

    fn request_next_image(&mut self, now_ms: u64, stage: &mut impl Stage) -> Result<()> {
        let url = self.endpoints.image_url(self.cache_buster.stamp(now_ms));
        let id = stage.request_image(&url)?;
        debug!(request = id.get(), %url, "Requested image");
        self.pending_image = Some(id);
        Ok(())
    }

    fn request_next_clip(&mut self, stage: &mut impl Stage) -> Result<()> {
        let clip = self.picker.pick(self.previous_clip);
        let url = self.endpoints.audio_url(clip);
        info!(%url, "Fetching audio");
        stage.play_audio(&url)?;
        self.previous_clip = Some(clip);
        Ok(())
    }
}
