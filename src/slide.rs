use raylib::ease;
use raylib::prelude::*;

use crate::constants::*;
use crate::stage::Fade;

/// The single persistent image element. Each cycle swaps its texture and fades it.
pub struct Slide {
    texture: Option<Texture2D>,

    alpha: f32,
    fade_duration: f32,
    tween_alpha: Option<ease::Tween>,
}

impl Slide {
    pub fn new(fade_duration: f32) -> Self {
        Self {
            texture: None,
            alpha: 1.0,
            fade_duration,
            tween_alpha: None,
        }
    }

    pub fn set_fade(&mut self, fade: Fade) {
        let target = match fade {
            Fade::FadingOut => 0.0,
            Fade::FadingIn => 1.0,
        };
        // Start from the current alpha so a fade can interrupt another one.
        self.tween_alpha = Some(ease::Tween::new(
            ease::cubic_out,
            self.alpha,
            target,
            self.fade_duration,
        ));
    }

    /// Swaps in a newly loaded image; the previous texture is unloaded.
    pub fn replace(&mut self, texture: Texture2D) {
        self.texture = Some(texture);
    }

    pub fn update(&mut self, dt: f32) {
        if let Some(tween) = self.tween_alpha.as_mut() {
            self.alpha = tween.apply(dt).clamp(0.0, 1.0);
            if tween.has_completed() {
                self.tween_alpha = None;
            }
        }
    }

    pub fn draw(&self, d: &mut RaylibDrawHandle) {
        let Some(texture) = &self.texture else {
            return;
        };

        let tex_width = texture.width() as f32;
        let tex_height = texture.height() as f32;
        let dest = fit_rect(
            tex_width,
            tex_height,
            d.get_screen_width() as f32,
            d.get_screen_height() as f32,
        );

        let tint = Color::new(255, 255, 255, (self.alpha * 255.0).round() as u8);
        d.draw_texture_pro(
            texture,
            Rectangle::new(0.0, 0.0, tex_width, tex_height),
            dest,
            Vector2::new(0.0, 0.0),
            0.0,
            tint,
        );
    }
}

/// Largest rectangle with the texture's aspect ratio that fits the screen, centered.
pub fn fit_rect(tex_width: f32, tex_height: f32, screen_width: f32, screen_height: f32) -> Rectangle {
    if tex_width <= 0.0 || tex_height <= 0.0 {
        return Rectangle::new(0.0, 0.0, 0.0, 0.0);
    }

    let scale = (screen_width / tex_width).min(screen_height / tex_height) * SLIDE_FILL;
    let width = tex_width * scale;
    let height = tex_height * scale;

    Rectangle::new(
        (screen_width - width) * 0.5,
        (screen_height - height) * 0.5,
        width,
        height,
    )
}

pub fn draw_splash(d: &mut RaylibDrawHandle, text: &str) {
    d.clear_background(Color::BLACK);

    let text_width = measure_text(text, SPLASH_FONT_SIZE);
    let x = (d.get_screen_width() - text_width) / 2;
    let y = (d.get_screen_height() - SPLASH_FONT_SIZE) / 2;
    d.draw_text(text, x, y, SPLASH_FONT_SIZE, Color::RAYWHITE);
}

#[cfg(test)]
mod tests {
    use super::fit_rect;

    #[test]
    fn wide_image_is_letterboxed() {
        let rect = fit_rect(2000.0, 500.0, 1000.0, 1000.0);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0.0, 375.0, 1000.0, 250.0));
    }

    #[test]
    fn tall_image_is_pillarboxed() {
        let rect = fit_rect(500.0, 1000.0, 1920.0, 1080.0);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (690.0, 0.0, 540.0, 1080.0));
    }

    #[test]
    fn small_image_is_scaled_up() {
        let rect = fit_rect(192.0, 108.0, 1920.0, 1080.0);
        assert_eq!((rect.x, rect.y, rect.width, rect.height), (0.0, 0.0, 1920.0, 1080.0));
    }

    #[test]
    fn empty_texture_draws_nothing() {
        let rect = fit_rect(0.0, 100.0, 1920.0, 1080.0);
        assert_eq!(rect.width, 0.0);
    }
}
