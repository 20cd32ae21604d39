pub const WINDOW_TITLE: &str = "Slideshow Presenter";
pub const FPS: u32 = 60;                      // Frames per second

pub const FADE_DURATION: f32 = 2.0;           // Fade-out wait before the next slide is requested (seconds)
pub const HOLD_DURATION: f32 = 6.0;           // Time between requesting a slide and starting the next fade (seconds)
pub const CURSOR_IDLE_DELAY: f32 = 1.0;       // Mouse stillness before the cursor is hidden (seconds)
pub const CURSOR_GRACE_PERIOD: f32 = 0.2;     // Moves are ignored this long after an auto-hide (seconds)

pub const SLIDE_FILL: f32 = 1.0;              // Fraction of the window a slide may cover
pub const SPLASH_FONT_SIZE: i32 = 40;
pub const MAX_CLIP_DRAWS: usize = 32;         // Random draws before the picker falls back to the next clip
