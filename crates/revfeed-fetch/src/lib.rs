//! # revfeed-fetch - Feed and Image Fetching
//!
//! The IO edge of the reviews feed: the seams through which the core asks for
//! pages and image bytes, the image cache, and the default implementations
//! used by the headless runner.
//!
//! Depends on [`revfeed_core`] for domain types and error handling.
//!
//! ## Public API
//!
//! ### Feed Fetching
//! - [`ReviewsProvider`] - `get_reviews(offset, limit)` returning raw page bytes
//! - [`FixtureReviewsProvider`] - Serves pages sliced out of a local JSON file
//!
//! ### Image Fetching
//! - [`ImageSource`] - Resolves a URL to raw bytes
//! - [`FileImageSource`] - `file://` URLs from the local filesystem
//! - [`ImageDecoder`], [`RasterDecoder`] - Bytes to [`revfeed_core::LoadedImage`]
//! - [`ImageLoader`] - URL-keyed cache with concurrent-request deduplication
//!   and ordered batch fetching

pub mod decoder;
pub mod image_loader;
pub mod provider;
pub mod source;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_utils;

// Public API re-exports
pub use decoder::{ImageDecoder, RasterDecoder};
pub use image_loader::ImageLoader;
pub use provider::{FixtureReviewsProvider, LocalReviewsProvider, ReviewsProvider};
pub use source::{FileImageSource, ImageSource, LocalImageSource};
