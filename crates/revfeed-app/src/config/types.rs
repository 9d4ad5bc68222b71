//! Configuration types for the reviews feed

use revfeed_core::{EdgeInsets, Size};
use serde::{Deserialize, Serialize};

/// Page size used when the configured one is unusable
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Application settings (.revfeed/config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub feed: FeedSettings,

    #[serde(default)]
    pub layout: LayoutSettings,

    #[serde(default)]
    pub rating: RatingSettings,

    #[serde(default)]
    pub text: TextSettings,
}

/// Pagination settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedSettings {
    /// Reviews requested per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    /// Prefetch when less than this many viewport heights remain below the
    /// scroll target
    #[serde(default = "default_threshold_screens")]
    pub load_threshold_screens: f64,

    /// Body line limit of a freshly loaded row (0 = unlimited)
    #[serde(default = "default_line_limit")]
    pub default_line_limit: usize,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            load_threshold_screens: default_threshold_screens(),
            default_line_limit: default_line_limit(),
        }
    }
}

impl FeedSettings {
    /// Configured page size, falling back to the default for 0
    pub fn effective_page_size(&self) -> usize {
        if self.page_size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            self.page_size
        }
    }
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_threshold_screens() -> f64 {
    2.5
}

fn default_line_limit() -> usize {
    3
}

/// Review row geometry, in logical pixels
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Edges of the row to its content
    pub insets: EdgeInsets,
    pub avatar_size: Size,
    /// Horizontal gap from the avatar to the content column
    pub avatar_to_username: f64,
    pub username_to_rating: f64,
    /// Rating to the photo strip, or to body/created when there are no photos
    pub rating_to_text: f64,
    pub photo_size: Size,
    pub photos_to_text: f64,
    /// Body to created date, or to the show-more affordance when shown
    pub text_to_created: f64,
    pub show_more_to_created: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            insets: EdgeInsets::new(9.0, 12.0, 9.0, 12.0),
            avatar_size: Size::new(36.0, 36.0),
            avatar_to_username: 10.0,
            username_to_rating: 6.0,
            rating_to_text: 6.0,
            photo_size: Size::new(55.0, 66.0),
            photos_to_text: 10.0,
            text_to_created: 6.0,
            show_more_to_created: 6.0,
        }
    }
}

/// Rating glyph rendering
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RatingSettings {
    pub stars_count: usize,
    /// Edge of one square glyph cell
    pub star_size: f64,
    pub spacing: f64,
    pub filled_glyph: char,
    pub empty_glyph: char,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            stars_count: 5,
            star_size: 16.0,
            spacing: 1.0,
            filled_glyph: '★',
            empty_glyph: '☆',
        }
    }
}

/// Fixed copy shown by the list
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TextSettings {
    pub show_more: String,
    /// Summary for exactly one review; `{count}` is substituted
    pub summary_one: String,
    /// Summary for any other count; `{count}` is substituted
    pub summary_many: String,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            show_more: "Show more...".to_string(),
            summary_one: "{count} review".to_string(),
            summary_many: "{count} reviews".to_string(),
        }
    }
}
