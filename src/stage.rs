use crate::error::Result;
use crate::fetch::RequestId;

/// Visual transition applied to the slide image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    FadingOut,
    FadingIn,
}

/// Completion reported by the stage for an earlier image request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    ImageLoaded(RequestId),
    ImageFailed(RequestId),
}

/// Output side of the slideshow: what the driver can show, fetch and play.
pub trait Stage {
    /// Hide the splash screen and show the slideshow.
    fn reveal_slideshow(&mut self);
    fn set_fade(&mut self, fade: Fade);
    /// Start loading the image at `url` into the slide. Completion arrives as a `StageEvent`.
    fn request_image(&mut self, url: &str) -> Result<RequestId>;
    /// Replace whatever the audio output is playing with the clip at `url`.
    fn play_audio(&mut self, url: &str) -> Result<()>;
}
