use thiserror::Error;

pub type Result<T> = std::result::Result<T, PresenterError>;

#[derive(Debug, Error)]
pub enum PresenterError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid origin {origin:?}: {reason}")]
    InvalidOrigin { origin: String, reason: String },

    #[error("unsupported image data ({len} bytes)")]
    UnsupportedImage { len: usize },

    #[error("media error: {0}")]
    Media(String),

    #[error("fetch workers are no longer running")]
    FetcherClosed,
}

impl PresenterError {
    #[must_use]
    pub fn media(message: impl Into<String>) -> Self {
        Self::Media(message.into())
    }

    #[must_use]
    pub fn invalid_origin(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidOrigin {
            origin: origin.into(),
            reason: reason.into(),
        }
    }
}
