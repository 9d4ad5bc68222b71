//! Row layout engine
//!
//! Computes sub-element frames top-to-bottom in a single pass and derives the
//! row height from the last frame. Layout is a pure function of the row, the
//! available width and the [`LayoutContext`]: nothing is cached on the row, so
//! the rendering side may ask for the same height as often as it scrolls.

mod review;
mod summary;

pub use review::{layout_review, ReviewFrames};
pub use summary::{layout_summary, SummaryFrames};

use revfeed_core::StyledText;
use serde::Serialize;

use crate::config::LayoutSettings;
use crate::row::Row;
use crate::text_metrics::TextMeasurer;

/// Everything besides the row itself that layout depends on.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub metrics: &'a LayoutSettings,
    pub measurer: &'a dyn TextMeasurer,
    /// Label of the "Show more..." affordance
    pub show_more: &'a StyledText,
}

impl std::fmt::Debug for LayoutContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutContext")
            .field("metrics", self.metrics)
            .field("show_more", self.show_more)
            .finish_non_exhaustive()
    }
}

/// Computed frames of one row.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowFrames {
    Review(ReviewFrames),
    Summary(SummaryFrames),
}

impl RowFrames {
    pub fn height(&self) -> f64 {
        match self {
            RowFrames::Review(frames) => frames.height,
            RowFrames::Summary(frames) => frames.height,
        }
    }
}

/// Lay out `row` within `max_width`.
pub fn layout_row(row: &Row, max_width: f64, ctx: &LayoutContext<'_>) -> RowFrames {
    match row {
        Row::Review(review) => RowFrames::Review(layout_review(review, max_width, ctx)),
        Row::Summary(summary) => RowFrames::Summary(layout_summary(summary, max_width, ctx)),
    }
}

/// Height of `row` within `max_width`.
pub fn row_height(row: &Row, max_width: f64, ctx: &LayoutContext<'_>) -> f64 {
    layout_row(row, max_width, ctx).height()
}
