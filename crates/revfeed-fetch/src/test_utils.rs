//! Test utilities for fetch collaborators
//!
//! In-memory providers and image sources for unit tests here and in
//! downstream crates (enable the `test-helpers` feature).

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use url::Url;

use revfeed_core::prelude::*;
use revfeed_core::{LoadedImage, Review, ReviewsPage};

use crate::decoder::ImageDecoder;
use crate::provider::ReviewsProvider;
use crate::source::ImageSource;

/// Creates `count` reviews named `Reviewer0..ReviewerN` without photos.
pub fn test_reviews(count: usize) -> Vec<Review> {
    (0..count).map(|i| test_review(i, &[])).collect()
}

/// Creates a single review with the given photo URLs.
///
/// # Arguments
/// * `index` - Used in the name and body to keep reviews distinguishable
/// * `photo_urls` - Photo URLs attached to the review
pub fn test_review(index: usize, photo_urls: &[&str]) -> Review {
    Review {
        first_name: format!("Reviewer{index}"),
        last_name: "Tester".to_string(),
        rating: (index % 5) as i64 + 1,
        text: format!("Review body number {index}"),
        created: format!("{} March", index % 28 + 1),
        photo_urls: photo_urls.iter().map(|u| u.to_string()).collect(),
    }
}

/// Serializes reviews as a bare JSON array (fixture file format).
pub fn reviews_json_array(reviews: &[Review]) -> String {
    serde_json::to_string(reviews).unwrap_or_else(|_| "[]".to_string())
}

/// Page envelope bytes for `reviews[offset..offset + limit]`.
pub fn page_bytes(reviews: &[Review], offset: usize, limit: usize) -> Vec<u8> {
    ReviewsPage::slice(reviews, offset, limit)
        .to_vec()
        .unwrap_or_default()
}

// ─────────────────────────────────────────────────────────────────────────────
// Reviews provider
// ─────────────────────────────────────────────────────────────────────────────

/// Scripted response for the next request of an [`InMemoryReviewsProvider`].
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Fail with a network error
    NetworkFailure(String),
    /// Return these bytes verbatim (e.g. a malformed body)
    Body(Vec<u8>),
}

#[derive(Debug, Default)]
struct ProviderInner {
    reviews: Vec<Review>,
    script: VecDeque<ScriptedResponse>,
    requests: Vec<(usize, usize)>,
}

/// Serves pages from an in-memory collection and records every request.
///
/// Clones share the same collection, script and request log.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReviewsProvider {
    inner: Arc<Mutex<ProviderInner>>,
}

impl InMemoryReviewsProvider {
    pub fn new(reviews: Vec<Review>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ProviderInner {
                reviews,
                ..ProviderInner::default()
            })),
        }
    }

    /// Queue a scripted response consumed by the next request
    pub fn push_response(&self, response: ScriptedResponse) {
        self.lock().script.push_back(response);
    }

    /// Replace the collection (e.g. new reviews arrived before a refresh)
    pub fn set_reviews(&self, reviews: Vec<Review>) {
        self.lock().reviews = reviews;
    }

    /// `(offset, limit)` of every request so far
    pub fn requests(&self) -> Vec<(usize, usize)> {
        self.lock().requests.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ProviderInner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ReviewsProvider for InMemoryReviewsProvider {
    async fn get_reviews(&self, offset: usize, limit: usize) -> Result<Vec<u8>> {
        // Let other tasks run so callers observe the request as in flight.
        tokio::task::yield_now().await;

        let mut inner = self.lock();
        inner.requests.push((offset, limit));
        match inner.script.pop_front() {
            Some(ScriptedResponse::NetworkFailure(message)) => Err(Error::network(message)),
            Some(ScriptedResponse::Body(bytes)) => Ok(bytes),
            None => Ok(page_bytes(&inner.reviews, offset, limit)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Image source and decoder
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct SourceInner {
    bytes: HashMap<String, Vec<u8>>,
    fetches: HashMap<String, usize>,
}

/// Serves image bytes from a URL map and counts fetches per URL.
///
/// Clones share the same map and counters.
#[derive(Debug, Clone, Default)]
pub struct StaticImageSource {
    inner: Arc<Mutex<SourceInner>>,
}

impl StaticImageSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an image that [`StubDecoder`] decodes to `width`×`height`
    pub fn with_image(self, url: &str, width: u32, height: u32) -> Self {
        self.insert_image(url, width, height);
        self
    }

    /// Register raw bytes for `url`
    pub fn with_bytes(self, url: &str, bytes: Vec<u8>) -> Self {
        self.lock().bytes.insert(url.to_string(), bytes);
        self
    }

    pub fn insert_image(&self, url: &str, width: u32, height: u32) {
        self.lock()
            .bytes
            .insert(url.to_string(), stub_image_bytes(width, height));
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.lock().fetches.get(url).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.lock().fetches.values().sum()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, SourceInner> {
        self.inner
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl ImageSource for StaticImageSource {
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        {
            let mut inner = self.lock();
            *inner.fetches.entry(url.as_str().to_string()).or_insert(0) += 1;
        }
        tokio::task::yield_now().await;

        self.lock()
            .bytes
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| Error::image_fetch(url.as_str(), "404 Not Found"))
    }
}

/// Bytes understood by [`StubDecoder`]
pub fn stub_image_bytes(width: u32, height: u32) -> Vec<u8> {
    format!("stub:{width}x{height}").into_bytes()
}

/// Decodes `stub:WxH` payloads into blank images; anything else fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubDecoder;

impl ImageDecoder for StubDecoder {
    fn decode(&self, url: &str, bytes: &[u8]) -> Result<LoadedImage> {
        let text = std::str::from_utf8(bytes).map_err(|e| Error::image_decode(url, e.to_string()))?;
        let dims = text
            .strip_prefix("stub:")
            .and_then(|rest| rest.split_once('x'))
            .and_then(|(w, h)| Some((w.parse::<u32>().ok()?, h.parse::<u32>().ok()?)))
            .ok_or_else(|| Error::image_decode(url, "unrecognized image data"))?;

        let (width, height) = dims;
        Ok(LoadedImage::new(
            width,
            height,
            vec![0u8; (width * height * 4) as usize],
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reviews_have_valid_ratings() {
        let reviews = test_reviews(12);
        assert_eq!(reviews.len(), 12);
        assert!(reviews.iter().all(|r| (1..=5).contains(&r.rating)));
        assert_eq!(reviews[3].first_name, "Reviewer3");
    }

    #[test]
    fn test_stub_decoder_round_trips_dimensions() {
        let image = StubDecoder.decode("u", &stub_image_bytes(7, 2)).unwrap();
        assert_eq!((image.width, image.height), (7, 2));
        assert!(StubDecoder.decode("u", b"junk").is_err());
    }
}
