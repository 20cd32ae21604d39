#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SlideshowState {
    Splash,     // Waiting for the first click, loop not started
    FadingOut,  // Current image is fading out before the next one is requested
    Holding,    // Next image and clip requested, waiting to start the next cycle
}
