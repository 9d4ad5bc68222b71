//! Row descriptors: the display-ready, framework-agnostic rows of the list
//!
//! Rows are plain values owned by [`crate::state::FeedState`]. They never hold
//! a handle back into the view-model: tapping "Show more..." turns into a
//! [`Message::ExpandRow`] carrying the row's id.

use revfeed_core::{LoadedImage, Review, StyledText};
use serde::Serialize;

use crate::formatter::{Formatter, RatingGlyphs};
use crate::message::Message;

/// Stable identifier of a review row.
///
/// Issued from a counter owned by the list state and never reused for the
/// lifetime of the list, refreshes included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RowId(u64);

impl RowId {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for RowId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row-{}", self.0)
    }
}

/// Discriminant of [`Row`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Review,
    Summary,
}

/// Avatar shown in the left column. Reviews carry no avatar URL, so every
/// row shows the bundled placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Avatar {
    #[default]
    Placeholder,
}

/// One review, formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewRow {
    pub id: RowId,
    pub avatar: Avatar,
    pub user_name: StyledText,
    pub rating: RatingGlyphs,
    pub body: StyledText,
    pub created: StyledText,
    /// Maximum body lines; 0 means unlimited
    pub line_limit: usize,
    /// Photos loaded so far, in feed order; starts empty
    pub photos: Vec<LoadedImage>,
    /// Source URLs of the photos
    pub photo_urls: Vec<String>,
}

impl ReviewRow {
    /// Format a review into a fresh row with no photos loaded yet
    pub fn from_review(
        id: RowId,
        review: &Review,
        formatter: &Formatter,
        line_limit: usize,
    ) -> Self {
        Self {
            id,
            avatar: Avatar::Placeholder,
            user_name: formatter.user_name(&review.first_name, &review.last_name),
            rating: formatter.rating(review.rating),
            body: formatter.body(&review.text),
            created: formatter.created(&review.created),
            line_limit,
            photos: Vec::new(),
            photo_urls: review.photo_urls.clone(),
        }
    }

    pub fn is_expanded(&self) -> bool {
        self.line_limit == 0
    }

    /// Event emitted when the row's "Show more..." affordance is tapped
    pub fn show_more_tapped(&self) -> Message {
        Message::ExpandRow { id: self.id }
    }
}

/// "N reviews" line appended after the final page.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub total_count: usize,
    pub total_text: StyledText,
}

/// A list row.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Review(ReviewRow),
    Summary(SummaryRow),
}

impl Row {
    pub fn kind(&self) -> RowKind {
        match self {
            Row::Review(_) => RowKind::Review,
            Row::Summary(_) => RowKind::Summary,
        }
    }

    /// Identifier of a review row; summary rows have none
    pub fn id(&self) -> Option<RowId> {
        match self {
            Row::Review(row) => Some(row.id),
            Row::Summary(_) => None,
        }
    }

    pub fn as_review(&self) -> Option<&ReviewRow> {
        match self {
            Row::Review(row) => Some(row),
            Row::Summary(_) => None,
        }
    }

    pub fn as_summary(&self) -> Option<&SummaryRow> {
        match self {
            Row::Summary(row) => Some(row),
            Row::Review(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use revfeed_core::TextRole;

    fn review() -> Review {
        Review {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            rating: 4,
            text: "Found a moth".to_string(),
            created: "9 September".to_string(),
            photo_urls: vec!["https://cdn.test/moth.jpg".to_string()],
        }
    }

    #[test]
    fn test_from_review_formats_fields() {
        let row = ReviewRow::from_review(RowId::new(7), &review(), &Formatter::default(), 3);

        assert_eq!(row.id, RowId::new(7));
        assert_eq!(row.user_name.as_str(), "Grace Hopper");
        assert_eq!(row.rating.filled, 4);
        assert_eq!(row.body.role, TextRole::Body);
        assert_eq!(row.created.as_str(), "9 September");
        assert_eq!(row.line_limit, 3);
        assert!(row.photos.is_empty());
        assert_eq!(row.photo_urls.len(), 1);
        assert!(!row.is_expanded());
    }

    #[test]
    fn test_show_more_tap_emits_expand_message() {
        let row = ReviewRow::from_review(RowId::new(3), &review(), &Formatter::default(), 3);
        assert!(matches!(
            row.show_more_tapped(),
            Message::ExpandRow { id } if id == RowId::new(3)
        ));
    }

    #[test]
    fn test_row_kind_and_id() {
        let review_row = Row::Review(ReviewRow::from_review(
            RowId::new(1),
            &review(),
            &Formatter::default(),
            3,
        ));
        let summary = Row::Summary(SummaryRow {
            total_count: 1,
            total_text: Formatter::default().total_count(1),
        });

        assert_eq!(review_row.kind(), RowKind::Review);
        assert_eq!(review_row.id(), Some(RowId::new(1)));
        assert_eq!(summary.kind(), RowKind::Summary);
        assert_eq!(summary.id(), None);
        assert!(summary.as_summary().is_some());
        assert!(summary.as_review().is_none());
    }

    #[test]
    fn test_row_id_display() {
        assert_eq!(RowId::new(42).to_string(), "row-42");
    }
}
