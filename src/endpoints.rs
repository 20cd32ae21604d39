use std::time::{SystemTime, UNIX_EPOCH};

use reqwest::Url;

use crate::error::{PresenterError, Result};

/// URL builder for the image and audio endpoints of one server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    origin: String,
}

impl Endpoints {
    /// Accepts `http` and `https` origins. A trailing slash is dropped.
    pub fn new(origin: &str) -> Result<Self> {
        let parsed = Url::parse(origin)
            .map_err(|e| PresenterError::invalid_origin(origin, e.to_string()))?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PresenterError::invalid_origin(
                origin,
                "scheme must be http or https",
            ));
        }

        Ok(Self {
            origin: origin.trim_end_matches('/').to_string(),
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn image_url(&self, timestamp_ms: u64) -> String {
        format!("{}/image?t={}", self.origin, timestamp_ms)
    }

    pub fn audio_url(&self, clip: &str) -> String {
        format!("{}/static/audio/{}", self.origin, clip)
    }
}

/// Cache-busting timestamps that strictly increase even if the clock stalls or steps back.
#[derive(Debug, Clone, Copy, Default)]
pub struct CacheBuster {
    last: Option<u64>,
}

impl CacheBuster {
    pub fn new() -> Self {
        Self { last: None }
    }

    pub fn stamp(&mut self, now_ms: u64) -> u64 {
        let stamp = match self.last {
            Some(last) => now_ms.max(last + 1),
            None => now_ms,
        };
        self.last = Some(stamp);
        stamp
    }
}

pub fn epoch_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_image_and_audio_urls() {
        let endpoints = Endpoints::new("http://127.0.0.1:8080/").unwrap();
        assert_eq!(endpoints.origin(), "http://127.0.0.1:8080");
        assert_eq!(
            endpoints.image_url(1_700_000_000_123),
            "http://127.0.0.1:8080/image?t=1700000000123"
        );
        assert_eq!(
            endpoints.audio_url("+1.wav"),
            "http://127.0.0.1:8080/static/audio/+1.wav"
        );
    }

    #[test]
    fn rejects_non_http_origins() {
        assert!(matches!(
            Endpoints::new("ftp://example.com"),
            Err(PresenterError::InvalidOrigin { .. })
        ));
        assert!(matches!(
            Endpoints::new("not a url"),
            Err(PresenterError::InvalidOrigin { .. })
        ));
    }

    #[test]
    fn stamps_strictly_increase() {
        let mut buster = CacheBuster::new();
        assert_eq!(buster.stamp(1000), 1000);
        assert_eq!(buster.stamp(1000), 1001);
        assert_eq!(buster.stamp(900), 1002);
        assert_eq!(buster.stamp(5000), 5000);
    }

    #[test]
    fn epoch_millis_is_after_2020() {
        assert!(epoch_millis() > 1_577_836_800_000);
    }
}
