//! Image decoding seam

use revfeed_core::prelude::*;
use revfeed_core::LoadedImage;

/// Turns fetched bytes into a [`LoadedImage`].
///
/// Decoding is CPU-bound and synchronous; it runs inside the fetch task.
pub trait ImageDecoder: Send + Sync {
    /// Decode `bytes` fetched from `url`. Failures map to [`Error::ImageDecode`].
    fn decode(&self, url: &str, bytes: &[u8]) -> Result<LoadedImage>;
}

/// Decoder backed by the `image` crate (PNG, JPEG, GIF, ... as enabled).
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterDecoder;

impl ImageDecoder for RasterDecoder {
    fn decode(&self, url: &str, bytes: &[u8]) -> Result<LoadedImage> {
        let decoded =
            image::load_from_memory(bytes).map_err(|e| Error::image_decode(url, e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(LoadedImage::new(width, height, rgba.into_raw()))
    }
}
