//! Text measurement seam
//!
//! Real text measurement belongs to the rendering side (it knows the fonts).
//! The layout engine only needs a bounding box for a styled string at a given
//! width, optionally clipped to a number of lines.
//!
//! [`MonospaceMeasurer`] is a deterministic fallback: every glyph is a cell of
//! fixed width per role (double for wide characters), text is wrapped with
//! `textwrap` and each line has a fixed height per role.

use std::collections::HashMap;

use revfeed_core::{Size, StyledText, TextRole};
use textwrap::core::display_width;
use textwrap::{Options, WrapAlgorithm};

/// Measures styled text for layout.
pub trait TextMeasurer: Send + Sync {
    /// Bounding size of `text` wrapped at `width`; `max_lines` of `None`
    /// means unclipped.
    fn measure(&self, text: &StyledText, width: f64, max_lines: Option<usize>) -> Size;

    /// Height of a single line for `role`
    fn line_height(&self, role: TextRole) -> f64;
}

/// Cell metrics of one text role.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleMetrics {
    pub char_width: f64,
    pub line_height: f64,
}

impl RoleMetrics {
    pub const fn new(char_width: f64, line_height: f64) -> Self {
        Self {
            char_width,
            line_height,
        }
    }
}

/// Fixed-cell text measurer.
#[derive(Debug, Clone)]
pub struct MonospaceMeasurer {
    roles: HashMap<TextRole, RoleMetrics>,
    fallback: RoleMetrics,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        let roles = HashMap::from([
            (TextRole::Username, RoleMetrics::new(8.5, 20.0)),
            (TextRole::Body, RoleMetrics::new(8.0, 20.0)),
            (TextRole::Created, RoleMetrics::new(7.0, 16.0)),
            (TextRole::Rating, RoleMetrics::new(16.0, 16.0)),
            (TextRole::TotalCount, RoleMetrics::new(7.5, 18.0)),
            (TextRole::ShowMore, RoleMetrics::new(7.5, 18.0)),
        ]);
        Self {
            roles,
            fallback: RoleMetrics::new(8.0, 20.0),
        }
    }
}

impl MonospaceMeasurer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same cell metrics for every role
    pub fn uniform(char_width: f64, line_height: f64) -> Self {
        Self {
            roles: HashMap::new(),
            fallback: RoleMetrics::new(char_width, line_height),
        }
    }

    pub fn with_role(mut self, role: TextRole, metrics: RoleMetrics) -> Self {
        self.roles.insert(role, metrics);
        self
    }

    pub fn metrics(&self, role: TextRole) -> RoleMetrics {
        self.roles.get(&role).copied().unwrap_or(self.fallback)
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &StyledText, width: f64, max_lines: Option<usize>) -> Size {
        if text.is_empty() {
            return Size::ZERO;
        }

        let metrics = self.metrics(text.role);
        let columns = if metrics.char_width > 0.0 {
            ((width / metrics.char_width).floor() as usize).max(1)
        } else {
            usize::MAX
        };

        let mut lines = wrap_line_widths(text.as_str(), columns);
        if let Some(limit) = max_lines {
            lines.truncate(limit);
        }

        let widest = lines.iter().copied().max().unwrap_or(0);
        Size::new(
            widest as f64 * metrics.char_width,
            lines.len() as f64 * metrics.line_height,
        )
    }

    fn line_height(&self, role: TextRole) -> f64 {
        self.metrics(role).line_height
    }
}

/// Display width (in cells) of every wrapped line of `text`.
///
/// Lines break first-fit between words; `\n` starts a new line and words
/// wider than `columns` are split.
pub fn wrap_line_widths(text: &str, columns: usize) -> Vec<usize> {
    let options = Options::new(columns.max(1)).wrap_algorithm(WrapAlgorithm::FirstFit);
    textwrap::wrap(text, options)
        .iter()
        .map(|line| display_width(line))
        .collect()
}
