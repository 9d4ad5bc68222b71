//! Styled display text
//!
//! The core never rasterizes text. A [`StyledText`] is a plain string plus the
//! [`TextRole`] that decides font and color on the rendering side; the same
//! role drives text measurement during layout.

use serde::Serialize;

/// Typographic role of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    /// Reviewer name
    Username,
    /// Review body
    Body,
    /// Creation date (muted)
    Created,
    /// Rating glyph sequence
    Rating,
    /// "N reviews" summary line
    TotalCount,
    /// "Show more..." affordance
    ShowMore,
}

/// A string tagged with the role that styles it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyledText {
    pub text: String,
    pub role: TextRole,
}

impl StyledText {
    pub fn new(text: impl Into<String>, role: TextRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl std::fmt::Display for StyledText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
