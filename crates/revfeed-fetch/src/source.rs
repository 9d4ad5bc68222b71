//! Image byte transport
//!
//! Network transport is provided by the embedding application. The crate
//! ships a `file://` source so the headless runner works against local
//! fixtures.

use revfeed_core::prelude::*;
use url::Url;

/// Resolves an already-validated URL to raw image bytes.
#[trait_variant::make(ImageSource: Send)]
pub trait LocalImageSource {
    /// Fetch the bytes behind `url`.
    ///
    /// Transport failures map to [`Error::ImageFetch`].
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>>;
}

/// Reads `file://` URLs from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageSource;

impl ImageSource for FileImageSource {
    async fn fetch_bytes(&self, url: &Url) -> Result<Vec<u8>> {
        if url.scheme() != "file" {
            return Err(Error::image_fetch(
                url.as_str(),
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        let path = url
            .to_file_path()
            .map_err(|_| Error::image_fetch(url.as_str(), "not a local file path"))?;

        tokio::fs::read(&path)
            .await
            .map_err(|e| Error::image_fetch(url.as_str(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::{FileImageSource, ImageSource};
    use revfeed_core::Error;
    use std::io::Write;
    use url::Url;

    #[tokio::test]
    async fn test_file_source_reads_local_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x89PNG fake").unwrap();
        let url = Url::from_file_path(file.path()).unwrap();

        let bytes = FileImageSource.fetch_bytes(&url).await.unwrap();
        assert_eq!(bytes, b"\x89PNG fake");
    }

    #[tokio::test]
    async fn test_file_source_rejects_remote_scheme() {
        let url = Url::parse("https://example.com/a.jpg").unwrap();
        let err = FileImageSource.fetch_bytes(&url).await.unwrap_err();
        assert!(matches!(err, Error::ImageFetch { .. }));
        assert!(err.to_string().contains("https"));
    }

    #[tokio::test]
    async fn test_file_source_missing_file_is_fetch_error() {
        let url = Url::parse("file:///no/such/photo.jpg").unwrap();
        let err = FileImageSource.fetch_bytes(&url).await.unwrap_err();
        assert!(matches!(err, Error::ImageFetch { .. }));
    }
}
