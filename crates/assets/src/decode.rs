use crate::AssetError;
use std::path::Path;

/// Decoded 8-bit pixels, tightly packed, `channels` bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Pixels expanded to RGBA8. Only 3- and 4-channel images convert.
    pub fn to_rgba8(&self) -> Option<Vec<u8>> {
        match self.channels {
            4 => Some(self.pixels.clone()),
            3 => Some(
                self.pixels
                    .chunks_exact(3)
                    .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
                    .collect(),
            ),
            _ => None,
        }
    }
}

/// Turns an image file into pixels.
pub trait ImageDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, AssetError>;
}

/// Decoder backed by the `image` crate.
///
/// Keeps the source channel count (grey, grey+alpha, RGB, RGBA) so the
/// registry can reject what it does not support. Rows are flipped by default
/// so that v = 0 is the bottom edge.
#[derive(Debug, Clone, Copy)]
pub struct ImageCrateDecoder {
    pub flip_vertically: bool,
}

impl Default for ImageCrateDecoder {
    fn default() -> Self {
        Self {
            flip_vertically: true,
        }
    }
}

impl ImageDecoder for ImageCrateDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedImage, AssetError> {
        let img = image::open(path).map_err(|e| AssetError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let img = if self.flip_vertically { img.flipv() } else { img };
        let (width, height) = (img.width(), img.height());
        let channels = img.color().channel_count();
        let pixels = match channels {
            1 => img.into_luma8().into_raw(),
            2 => img.into_luma_alpha8().into_raw(),
            3 => img.into_rgb8().into_raw(),
            _ => img.into_rgba8().into_raw(),
        };
        Ok(DecodedImage {
            width,
            height,
            channels: channels.min(4),
            pixels,
        })
    }
}
