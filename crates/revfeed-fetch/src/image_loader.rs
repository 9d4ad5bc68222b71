//! URL-keyed image cache
//!
//! - Cache is unbounded, keyed by the exact URL string, populated lazily and
//!   never evicted.
//! - Concurrent requests for the same URL share one fetch: each URL owns a
//!   [`OnceCell`] that the first caller initializes while later callers wait.
//! - A failed fetch leaves the cell empty, so the next request retries.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use futures_util::future::join_all;
use tokio::sync::OnceCell;
use url::Url;

use revfeed_core::prelude::*;
use revfeed_core::LoadedImage;

use crate::decoder::ImageDecoder;
use crate::source::ImageSource;

type CacheSlot = Arc<OnceCell<LoadedImage>>;

/// Fetches, decodes and memoizes images.
///
/// Shared between background tasks behind an `Arc`; the cache map is only
/// locked long enough to look up or insert a slot.
pub struct ImageLoader<S> {
    source: S,
    decoder: Box<dyn ImageDecoder>,
    slots: Mutex<HashMap<String, CacheSlot>>,
}

impl<S: ImageSource + Sync> ImageLoader<S> {
    pub fn new(source: S, decoder: impl ImageDecoder + 'static) -> Self {
        Self {
            source,
            decoder: Box::new(decoder),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Resolve `url` to an image, from cache when previously fetched.
    pub async fn fetch_image(&self, url: &str) -> Result<LoadedImage> {
        let parsed = Url::parse(url).map_err(|e| Error::invalid_url(url, e.to_string()))?;

        let slot = self.slot(url);
        if let Some(image) = slot.get() {
            trace!("Image cache hit: {}", url);
            return Ok(image.clone());
        }

        let source = &self.source;
        let decoder = &self.decoder;
        let parsed = &parsed;
        let image = slot
            .get_or_try_init(|| async move {
                debug!("Image cache miss, fetching: {}", url);
                let bytes = source.fetch_bytes(parsed).await?;
                decoder.decode(url, &bytes)
            })
            .await?;

        Ok(image.clone())
    }

    /// Fetch every URL concurrently and return the images that loaded, in
    /// input order. Failed entries are dropped, never failing the batch.
    pub async fn fetch_image_batch(&self, urls: &[String]) -> Vec<LoadedImage> {
        let results = join_all(urls.iter().map(|url| self.fetch_image(url))).await;

        results
            .into_iter()
            .zip(urls)
            .filter_map(|(result, url)| match result {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!("Dropping image {}: {}", url, e);
                    None
                }
            })
            .collect()
    }

    /// Previously fetched image for `url`, if any
    pub fn cached(&self, url: &str) -> Option<LoadedImage> {
        self.lock_slots().get(url).and_then(|slot| slot.get().cloned())
    }

    /// Number of URLs with a successfully loaded image
    pub fn cached_count(&self) -> usize {
        self.lock_slots()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    fn slot(&self, url: &str) -> CacheSlot {
        self.lock_slots()
            .entry(url.to_string())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone()
    }

    fn lock_slots(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheSlot>> {
        // A panic while holding the guard cannot leave the map half-updated.
        self.slots
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<S> std::fmt::Debug for ImageLoader<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageLoader").finish_non_exhaustive()
    }
}
