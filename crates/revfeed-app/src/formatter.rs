//! Text and rating formatting
//!
//! Turns raw review fields into styled display text. Pure and cheap; runs on
//! the owning context while a page is merged.

use revfeed_core::prelude::*;
use revfeed_core::{Size, StyledText, TextRole};

use crate::config::{RatingSettings, TextSettings};

/// Rendered star rating: the glyph run plus the box it occupies.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingGlyphs {
    pub glyphs: StyledText,
    /// Number of filled stars after clamping
    pub filled: usize,
    pub size: Size,
}

/// Formats names, bodies, dates, ratings and the summary line.
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    rating: RatingSettings,
    text: TextSettings,
}

impl Formatter {
    pub fn new(rating: RatingSettings, text: TextSettings) -> Self {
        Self { rating, text }
    }

    pub fn user_name(&self, first_name: &str, last_name: &str) -> StyledText {
        StyledText::new(format!("{first_name} {last_name}"), TextRole::Username)
    }

    pub fn body(&self, text: &str) -> StyledText {
        StyledText::new(text, TextRole::Body)
    }

    pub fn created(&self, created: &str) -> StyledText {
        StyledText::new(created, TextRole::Created)
    }

    pub fn show_more(&self) -> StyledText {
        StyledText::new(self.text.show_more.clone(), TextRole::ShowMore)
    }

    /// Summary line shown after the final page, e.g. "45 reviews"
    pub fn total_count(&self, count: usize) -> StyledText {
        let template = if count == 1 {
            &self.text.summary_one
        } else {
            &self.text.summary_many
        };
        StyledText::new(
            template.replace("{count}", &count.to_string()),
            TextRole::TotalCount,
        )
    }

    /// Glyph run for `rating`, clamped into `0..=stars_count`.
    pub fn rating(&self, rating: i64) -> RatingGlyphs {
        let stars = self.rating.stars_count;
        let filled = usize::try_from(rating.max(0)).unwrap_or(usize::MAX).min(stars);
        if i64::try_from(filled).map_or(true, |f| f != rating) {
            warn!("Rating {} outside 0..={}, clamped to {}", rating, stars, filled);
        }

        let glyphs: String = std::iter::repeat(self.rating.filled_glyph)
            .take(filled)
            .chain(std::iter::repeat(self.rating.empty_glyph).take(stars - filled))
            .collect();

        let gaps = stars.saturating_sub(1) as f64;
        let size = if stars == 0 {
            Size::ZERO
        } else {
            Size::new(
                stars as f64 * self.rating.star_size + gaps * self.rating.spacing,
                self.rating.star_size,
            )
        };

        RatingGlyphs {
            glyphs: StyledText::new(glyphs, TextRole::Rating),
            filled,
            size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_name_joins_first_and_last() {
        let name = Formatter::default().user_name("Ada", "Lovelace");
        assert_eq!(name.as_str(), "Ada Lovelace");
        assert_eq!(name.role, TextRole::Username);
    }

    #[test]
    fn test_rating_glyphs_and_size() {
        let rating = Formatter::default().rating(3);
        assert_eq!(rating.glyphs.as_str(), "★★★☆☆");
        assert_eq!(rating.filled, 3);
        assert_eq!(rating.size, Size::new(5.0 * 16.0 + 4.0, 16.0));
    }

    #[test]
    fn test_rating_out_of_range_is_clamped() {
        let formatter = Formatter::default();
        assert_eq!(formatter.rating(9).glyphs.as_str(), "★★★★★");
        assert_eq!(formatter.rating(-2).glyphs.as_str(), "☆☆☆☆☆");
        assert_eq!(formatter.rating(-2).filled, 0);
    }

    #[test]
    fn test_custom_rating_glyphs() {
        let formatter = Formatter::new(
            RatingSettings {
                stars_count: 3,
                star_size: 10.0,
                spacing: 2.0,
                filled_glyph: '*',
                empty_glyph: '.',
            },
            TextSettings::default(),
        );
        let rating = formatter.rating(1);
        assert_eq!(rating.glyphs.as_str(), "*..");
        assert_eq!(rating.size, Size::new(34.0, 10.0));
    }

    #[test]
    fn test_total_count_pluralization() {
        let formatter = Formatter::default();
        assert_eq!(formatter.total_count(1).as_str(), "1 review");
        assert_eq!(formatter.total_count(45).as_str(), "45 reviews");
        assert_eq!(formatter.total_count(0).as_str(), "0 reviews");
        assert_eq!(formatter.total_count(45).role, TextRole::TotalCount);
    }

    #[test]
    fn test_created_and_body_keep_text_verbatim() {
        let formatter = Formatter::default();
        assert_eq!(formatter.created("13 March").role, TextRole::Created);
        assert_eq!(formatter.body("  spaced  ").as_str(), "  spaced  ");
        assert_eq!(formatter.show_more().as_str(), "Show more...");
    }
}
