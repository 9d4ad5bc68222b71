//! Application error types with rich context

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Feed Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Feed request failed: {message}")]
    Network { message: String },

    #[error("Malformed reviews page: {message}")]
    Decode { message: String },

    // ─────────────────────────────────────────────────────────────
    // Image Errors (per URL, never fatal)
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid image URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Failed to fetch image '{url}': {message}")]
    ImageFetch { url: String, message: String },

    #[error("Failed to decode image '{url}': {message}")]
    ImageDecode { url: String, message: String },

    // ─────────────────────────────────────────────────────────────
    // Row Query Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Row index {index} out of range (row count {len})")]
    IndexOutOfRange { index: usize, len: usize },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn invalid_url(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidUrl {
            url: url.into(),
            reason: reason.into(),
        }
    }

    pub fn image_fetch(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ImageFetch {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn image_decode(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ImageDecode {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this is a recoverable error.
    ///
    /// Feed failures re-permit loading; image failures drop a single image.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Network { .. }
                | Error::Decode { .. }
                | Error::Json(_)
                | Error::InvalidUrl { .. }
                | Error::ImageFetch { .. }
                | Error::ImageDecode { .. }
        )
    }

    /// Check if this error is a contract violation by the caller
    pub fn is_programming_error(&self) -> bool {
        matches!(self, Error::IndexOutOfRange { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = Error::network("connection reset");
        assert_eq!(err.to_string(), "Feed request failed: connection reset");

        let err = Error::index_out_of_range(7, 3);
        assert_eq!(err.to_string(), "Row index 7 out of range (row count 3)");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_feed_and_image_errors_are_recoverable() {
        assert!(Error::network("timeout").is_recoverable());
        assert!(Error::decode("missing field `count`").is_recoverable());
        assert!(Error::invalid_url("::", "relative URL without a base").is_recoverable());
        assert!(Error::image_fetch("file:///a.png", "not found").is_recoverable());
        assert!(Error::image_decode("file:///a.png", "bad header").is_recoverable());
    }

    #[test]
    fn test_index_out_of_range_is_programming_error() {
        let err = Error::index_out_of_range(0, 0);
        assert!(err.is_programming_error());
        assert!(!err.is_recoverable());
        assert!(!Error::network("x").is_programming_error());
    }

    #[test]
    fn test_image_errors_mention_url() {
        let err = Error::image_fetch("file:///tmp/a.jpg", "permission denied");
        assert!(err.to_string().contains("file:///tmp/a.jpg"));
        assert!(err.to_string().contains("permission denied"));
    }
}
