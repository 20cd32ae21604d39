use std::path::Path;

use raylib::prelude::*;
use tracing::debug;

use crate::error::{PresenterError, Result};

/// The single audio output. Playing a clip replaces the one before it.
pub struct AudioOutput<'aud> {
    device: &'aud RaylibAudio,
    current: Option<Sound<'aud>>,
}

impl<'aud> AudioOutput<'aud> {
    pub fn new(device: &'aud RaylibAudio) -> Self {
        Self {
            device,
            current: None,
        }
    }

    pub fn play(&mut self, file_type: &str, bytes: &[u8]) -> Result<()> {
        let wave = self
            .device
            .new_wave_from_memory(file_type, bytes)
            .map_err(|e| PresenterError::media(format!("failed to decode audio: {e}")))?;
        let sound = self
            .device
            .new_sound_from_wave(&wave)
            .map_err(|e| PresenterError::media(format!("failed to create sound: {e}")))?;

        // Dropping the previous sound stops and unloads it.
        self.current = None;
        sound.play();
        debug!(bytes = bytes.len(), "Playing clip");
        self.current = Some(sound);
        Ok(())
    }
}

/// File type hint for the audio decoder, taken from the URL path.
pub fn audio_file_type(url: &str) -> String {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_else(|| ".wav".to_string())
}

#[cfg(test)]
mod tests {
    use super::audio_file_type;

    #[test]
    fn file_type_comes_from_url_extension() {
        assert_eq!(audio_file_type("http://host/static/audio/+1.wav"), ".wav");
        assert_eq!(audio_file_type("http://host/static/audio/-5.WAV?x=1"), ".wav");
        assert_eq!(audio_file_type("http://host/static/audio/clip.ogg"), ".ogg");
    }

    #[test]
    fn missing_extension_defaults_to_wav() {
        assert_eq!(audio_file_type("http://host/static/audio/clip"), ".wav");
    }
}
