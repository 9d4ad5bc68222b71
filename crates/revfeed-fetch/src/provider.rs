//! Feed fetch collaborator
//!
//! The core owns decoding: providers hand back raw response bytes and the
//! view-model turns them into a [`revfeed_core::ReviewsPage`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use revfeed_core::prelude::*;
use revfeed_core::{Review, ReviewsPage};

/// Paginated reviews feed.
///
/// Background tasks call this, so the spawned future must be `Send`.
#[trait_variant::make(ReviewsProvider: Send)]
pub trait LocalReviewsProvider {
    /// Fetch the page starting at `offset` holding at most `limit` reviews.
    ///
    /// Transport failures map to [`Error::Network`].
    async fn get_reviews(&self, offset: usize, limit: usize) -> Result<Vec<u8>>;
}

/// Serves pages sliced out of a JSON file holding the whole collection.
///
/// The file may be either a page envelope (`{"count": .., "items": [..]}`,
/// with `items` being the full collection) or a bare array of reviews. The
/// file is re-read on every request so edits show up on refresh.
#[derive(Debug, Clone)]
pub struct FixtureReviewsProvider {
    path: PathBuf,
    latency: Duration,
}

impl FixtureReviewsProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            latency: Duration::ZERO,
        }
    }

    /// Delay every response to mimic a slow network
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_collection(&self) -> Result<Vec<Review>> {
        let bytes = tokio::fs::read(&self.path).await.map_err(|e| {
            Error::network(format!("failed to read {}: {}", self.path.display(), e))
        })?;

        let value: serde_json::Value = serde_json::from_slice(&bytes)
            .map_err(|e| Error::network(format!("{} is not JSON: {}", self.path.display(), e)))?;

        let items = match value {
            serde_json::Value::Array(_) => value,
            serde_json::Value::Object(mut map) => map
                .remove("items")
                .ok_or_else(|| Error::network("fixture has no `items` array"))?,
            _ => return Err(Error::network("fixture must be an object or an array")),
        };

        serde_json::from_value(items)
            .map_err(|e| Error::network(format!("fixture reviews are malformed: {}", e)))
    }
}

impl ReviewsProvider for FixtureReviewsProvider {
    async fn get_reviews(&self, offset: usize, limit: usize) -> Result<Vec<u8>> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let all = self.read_collection().await?;
        let page = ReviewsPage::slice(&all, offset, limit);
        debug!(
            "Fixture page offset={} limit={} -> {} of {} reviews",
            offset,
            limit,
            page.items.len(),
            page.count
        );
        page.to_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::{FixtureReviewsProvider, ReviewsProvider};
    use crate::test_utils::{reviews_json_array, test_reviews};
    use revfeed_core::{Error, ReviewsPage};
    use std::io::Write;

    fn fixture_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_fixture_provider_slices_array_fixture() {
        let file = fixture_file(&reviews_json_array(&test_reviews(5)));
        let provider = FixtureReviewsProvider::new(file.path());

        let bytes = provider.get_reviews(2, 2).await.unwrap();
        let page = ReviewsPage::from_slice(&bytes).unwrap();

        assert_eq!(page.count, 5);
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].first_name, "Reviewer2");
    }

    #[tokio::test]
    async fn test_fixture_provider_accepts_envelope_fixture() {
        let envelope = ReviewsPage::slice(&test_reviews(3), 0, 3);
        let json = String::from_utf8(envelope.to_vec().unwrap()).unwrap();
        let file = fixture_file(&json);
        let provider = FixtureReviewsProvider::new(file.path());

        let page = ReviewsPage::from_slice(&provider.get_reviews(0, 20).await.unwrap()).unwrap();
        assert_eq!(page.count, 3);
        assert_eq!(page.items.len(), 3);
    }

    #[tokio::test]
    async fn test_fixture_provider_missing_file_is_network_error() {
        let provider = FixtureReviewsProvider::new("/definitely/not/here.json");
        let err = provider.get_reviews(0, 20).await.unwrap_err();
        assert!(matches!(err, Error::Network { .. }));
    }

    #[tokio::test]
    async fn test_fixture_provider_rejects_scalar_fixture() {
        let file = fixture_file("42");
        let provider = FixtureReviewsProvider::new(file.path());
        assert!(provider.get_reviews(0, 20).await.is_err());
    }
}
