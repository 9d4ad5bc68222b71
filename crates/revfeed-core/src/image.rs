//! Decoded images shared between the cache and row descriptors

use std::sync::Arc;

/// A decoded RGBA8 image.
///
/// Pixel data sits behind an `Arc`, so the same image can live in the cache
/// and in any number of rows without copying.
#[derive(Clone, PartialEq, Eq)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pixels: Arc<[u8]>,
}

impl LoadedImage {
    pub fn new(width: u32, height: u32, pixels: impl Into<Arc<[u8]>>) -> Self {
        Self {
            width,
            height,
            pixels: pixels.into(),
        }
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True when both handles point at the same pixel buffer
    pub fn shares_pixels_with(&self, other: &LoadedImage) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

impl std::fmt::Debug for LoadedImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedImage")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_pixels() {
        let image = LoadedImage::new(1, 1, vec![255u8, 0, 0, 255]);
        let copy = image.clone();
        assert!(image.shares_pixels_with(&copy));
        assert_eq!(copy.pixels(), &[255, 0, 0, 255]);
    }

    #[test]
    fn test_debug_omits_pixel_data() {
        let image = LoadedImage::new(2, 1, vec![0u8; 8]);
        let debug = format!("{image:?}");
        assert!(debug.contains("bytes: 8"));
    }
}
