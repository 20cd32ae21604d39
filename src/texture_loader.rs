use std::io::Cursor;

use exif::{In, Reader, Tag, Value};
use raylib::prelude::*;
use tracing::{debug, warn};

use crate::error::{PresenterError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageFormat {
    /// File type hint in the form raylib expects.
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => ".png",
            ImageFormat::Jpeg => ".jpg",
            ImageFormat::Gif => ".gif",
            ImageFormat::Bmp => ".bmp",
        }
    }
}

/// The server does not name its files, so the format comes from the magic bytes.
pub fn sniff_format(bytes: &[u8]) -> Option<ImageFormat> {
    match bytes {
        [0x89, b'P', b'N', b'G', ..] => Some(ImageFormat::Png),
        [0xFF, 0xD8, 0xFF, ..] => Some(ImageFormat::Jpeg),
        [b'G', b'I', b'F', b'8', ..] => Some(ImageFormat::Gif),
        [b'B', b'M', ..] => Some(ImageFormat::Bmp),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    None,
    Half,
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    // 1 = Top-left (Normal)
    // 3 = Bottom-right (180 deg)
    // 6 = Top-right (90 deg clockwise)
    // 8 = Bottom-left (270 deg clockwise / 90 deg counter-clockwise)
    // Others involve flips, ignored.
    pub fn from_orientation(orientation: u16) -> Self {
        match orientation {
            3 => Rotation::Half,
            6 => Rotation::Clockwise,
            8 => Rotation::CounterClockwise,
            _ => Rotation::None,
        }
    }
}

/// EXIF orientation of a JPEG, or 1 when there is none.
pub fn exif_orientation(bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| match &field.value {
                Value::Short(values) => values.first().copied(),
                _ => None,
            })
            .unwrap_or(1),
        Err(e) => {
            debug!(%e, "No usable EXIF data");
            1
        }
    }
}

/// Decodes fetched image bytes into a texture, applying EXIF rotation for JPEGs.
pub fn load_texture_from_bytes(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    bytes: Vec<u8>,
) -> Result<Texture2D> {
    let format = sniff_format(&bytes).ok_or(PresenterError::UnsupportedImage { len: bytes.len() })?;

    let rotation = if format == ImageFormat::Jpeg {
        Rotation::from_orientation(exif_orientation(&bytes))
    } else {
        Rotation::None
    };

    let mut image = Image::load_image_from_mem(format.extension(), &bytes)
        .map_err(|e| PresenterError::media(format!("failed to decode {format:?} image: {e}")))?;

    match rotation {
        Rotation::Half => {
            image.rotate_cw();
            image.rotate_cw();
        }
        Rotation::Clockwise => image.rotate_cw(),
        Rotation::CounterClockwise => image.rotate_ccw(),
        Rotation::None => {}
    }
    if rotation != Rotation::None {
        debug!(?rotation, "Applied EXIF rotation");
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| PresenterError::media(format!("failed to create texture: {e}")))?;

    if texture.width() == 0 || texture.height() == 0 {
        warn!("Decoded image has no pixels");
    }

    Ok(texture)
}
