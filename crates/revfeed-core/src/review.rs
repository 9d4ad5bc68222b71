//! Wire model of the paginated reviews feed
//!
//! The feed responds with a JSON page envelope:
//!
//! ```json
//! {
//!   "count": 45,
//!   "items": [
//!     {
//!       "first_name": "Ada",
//!       "last_name": "Lovelace",
//!       "rating": 5,
//!       "text": "Great!",
//!       "created": "13 March",
//!       "photo_urls": ["https://example.com/1.jpg"]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single review record. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Review {
    pub first_name: String,
    pub last_name: String,
    /// Star rating, 1-5 on a well-formed feed
    pub rating: i64,
    pub text: String,
    /// Creation date, displayed verbatim
    pub created: String,
    #[serde(default)]
    pub photo_urls: Vec<String>,
}

/// Page envelope: total review count for the whole collection plus the
/// reviews of the current page.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReviewsPage {
    pub count: usize,
    pub items: Vec<Review>,
}

impl ReviewsPage {
    /// Decode a page envelope from raw response bytes.
    ///
    /// Any malformed body maps to [`Error::Decode`].
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::decode(e.to_string()))
    }

    /// Encode the envelope back to JSON bytes
    pub fn to_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Slice `limit` reviews starting at `offset` out of a full collection,
    /// keeping the total count of the collection.
    pub fn slice(all: &[Review], offset: usize, limit: usize) -> Self {
        let start = offset.min(all.len());
        let end = offset.saturating_add(limit).min(all.len());
        Self {
            count: all.len(),
            items: all[start..end].to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(first: &str) -> Review {
        Review {
            first_name: first.to_string(),
            last_name: "Doe".to_string(),
            rating: 4,
            text: "Fine".to_string(),
            created: "1 May".to_string(),
            photo_urls: vec![],
        }
    }

    #[test]
    fn test_decode_page_envelope() {
        let json = br#"{
            "count": 2,
            "items": [{
                "first_name": "Ada",
                "last_name": "Lovelace",
                "rating": 5,
                "text": "Great engine",
                "created": "13 March",
                "photo_urls": ["https://example.com/a.jpg", "https://example.com/b.jpg"]
            }]
        }"#;

        let page = ReviewsPage::from_slice(json).unwrap();
        assert_eq!(page.count, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].first_name, "Ada");
        assert_eq!(page.items[0].last_name, "Lovelace");
        assert_eq!(page.items[0].rating, 5);
        assert_eq!(page.items[0].photo_urls.len(), 2);
    }

    #[test]
    fn test_missing_photo_urls_defaults_to_empty() {
        let json = br#"{"count":1,"items":[{"first_name":"A","last_name":"B","rating":3,"text":"","created":"today"}]}"#;
        let page = ReviewsPage::from_slice(json).unwrap();
        assert!(page.items[0].photo_urls.is_empty());
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = ReviewsPage::from_slice(b"<html>502</html>").unwrap_err();
        assert!(matches!(err, Error::Decode { .. }));

        let err = ReviewsPage::from_slice(br#"{"items":[]}"#).unwrap_err();
        assert!(err.to_string().contains("count"));
    }

    #[test]
    fn test_slice_clamps_to_collection() {
        let all: Vec<Review> = ["a", "b", "c", "d", "e"].iter().map(|n| review(n)).collect();

        let page = ReviewsPage::slice(&all, 0, 2);
        assert_eq!(page.count, 5);
        assert_eq!(page.items.len(), 2);

        let page = ReviewsPage::slice(&all, 4, 2);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].first_name, "e");

        let page = ReviewsPage::slice(&all, 10, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.count, 5);
    }
}
